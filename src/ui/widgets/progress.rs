/// Percentage bar for the current pipeline phase
#[derive(Debug, Clone)]
pub struct ProgressBar {
    percent: u8,
    width: u16,
}

impl ProgressBar {
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
            width: 24,
        }
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn render(&self, supports_unicode: bool) -> String {
        let (filled, empty) = self.bar_segments();
        let bar = if supports_unicode {
            format!("{}{}", "━".repeat(filled), "─".repeat(empty))
        } else {
            format!("{}{}", "=".repeat(filled), "-".repeat(empty))
        };

        format!("{bar} {:>3}%", self.percent)
    }

    fn bar_segments(&self) -> (usize, usize) {
        let width = self.width.max(1) as usize;
        // Whole cells only: the bar is full exactly at 100%
        let filled = width * self.percent as usize / 100;
        (filled, width - filled)
    }
}
