use log::LevelFilter;
use simplelog::WriteLogger;

/// Initialize file diagnostics at ~/.local/share/cc-hookkit/hookkit.log.
/// Best-effort: any failure leaves logging disabled (diagnostics must
/// never block the hook).
pub fn init(level: &str) {
    let filter = match level {
        "off" => return,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    };
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let log_dir = std::path::Path::new(&home).join(".local/share/cc-hookkit");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("hookkit.log"))
    else {
        return;
    };
    let _ = WriteLogger::init(filter, simplelog::Config::default(), file);
}

/// Simple UTC timestamp without external deps.
pub fn timestamp_now() -> String {
    let (year, month, day, h, m, s) = utc_now_parts();
    format!("{year:04}-{month:02}-{day:02}T{h:02}:{m:02}:{s:02}Z")
}

/// Compact UTC timestamp for backup suffixes, e.g. `20250821T143012Z`.
pub fn timestamp_compact() -> String {
    let (year, month, day, h, m, s) = utc_now_parts();
    format!("{year:04}{month:02}{day:02}T{h:02}{m:02}{s:02}Z")
}

fn utc_now_parts() -> (u64, u64, u64, u64, u64, u64) {
    let dur = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = dur.as_secs();
    let days = secs / 86400;
    let rem = secs % 86400;
    let (year, month, day) = epoch_days_to_date(days);
    (year, month, day, rem / 3600, (rem % 3600) / 60, rem % 60)
}

/// Convert days since Unix epoch to (year, month, day).
fn epoch_days_to_date(days: u64) -> (u64, u64, u64) {
    // Civil calendar from days algorithm (Howard Hinnant)
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
