pub struct TimeFormat {
    pub minutes: usize,
    pub seconds: usize,
    pub compact: bool,
}

impl TimeFormat {
    // Rest countdowns read best short: "45s", or "1:30" over a minute.
    pub fn for_rest() -> Self {
        let mut format = TimeFormat::default();
        format.compact = true;
        format
    }

    pub fn for_clock() -> Self {
        TimeFormat::default()
    }

    pub fn format_seconds(&self, total: u32) -> String {
        let minutes = total / 60;
        let seconds = total % 60;

        if self.compact && minutes == 0 {
            return format!("{}s", seconds);
        }
        format!(
            "{}:{}",
            pad_zeroes(minutes, self.minutes),
            pad_zeroes(seconds, self.seconds),
        )
    }
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            minutes: 1,
            seconds: 2,
            compact: false,
        }
    }
}

fn pad_zeroes(value: u32, length: usize) -> String {
    let str_length = value.to_string().chars().count();
    if str_length >= length {
        return format!("{}", value);
    }
    let count = length - str_length;
    let zeroes = "0".repeat(count);
    format!("{}{}", zeroes, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_under_a_minute_is_compact() {
        assert_eq!(TimeFormat::for_rest().format_seconds(45), "45s");
        assert_eq!(TimeFormat::for_rest().format_seconds(5), "5s");
    }

    #[test]
    fn rest_over_a_minute_shows_minutes() {
        assert_eq!(TimeFormat::for_rest().format_seconds(90), "1:30");
        assert_eq!(TimeFormat::for_rest().format_seconds(60), "1:00");
    }

    #[test]
    fn clock_pads_seconds() {
        assert_eq!(TimeFormat::for_clock().format_seconds(65), "1:05");
        assert_eq!(TimeFormat::for_clock().format_seconds(725), "12:05");
        assert_eq!(TimeFormat::for_clock().format_seconds(0), "0:00");
    }
}
