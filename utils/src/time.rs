//! Duration formatting helpers.

use std::time::Duration;

/// Format a duration for log lines: `"850ms"`, `"12.5s"`, `"3m 20s"`.
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        let tenths = (millis % 1000) / 100;
        if tenths == 0 {
            format!("{}s", millis / 1000)
        } else {
            format!("{}.{}s", millis / 1000, tenths)
        }
    } else {
        let secs = d.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
