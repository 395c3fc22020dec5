// Renderer module - formatting utilities shared by the layout

/// Format a traffic volume for display
pub fn format_bytes(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a z-score with its sign
pub fn format_z(z_score: f64) -> String {
    format!("{:+.2}σ", z_score)
}

/// `revealed/total (pct%)`
pub fn format_progress(revealed: usize, total: usize) -> String {
    let pct = if total == 0 {
        100.0
    } else {
        revealed as f64 / total as f64 * 100.0
    };
    format!("{}/{} ({:.0}%)", revealed, total, pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(format_bytes(1234.567), "1234.57");
        assert_eq!(format_z(3.456), "+3.46σ");
        assert_eq!(format_z(-0.5), "-0.50σ");
        assert_eq!(format_progress(50, 200), "50/200 (25%)");
        assert_eq!(format_progress(0, 0), "0/0 (100%)");
    }
}
