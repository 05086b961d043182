//! Cosmetic indicators: the blinking live dot and the "thinking" dots

/// Live dot state, flipped on a fixed period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessIndicator {
    visible: bool,
}

impl Default for LivenessIndicator {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl LivenessIndicator {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Cycles `"" → "." → ".." → "..." → ""`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingDots {
    count: u8,
}

impl LoadingDots {
    pub const MAX: u8 = 3;

    pub fn advance(&mut self) {
        self.count = if self.count >= Self::MAX { 0 } else { self.count + 1 };
    }

    pub fn as_str(&self) -> &'static str {
        match self.count {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liveness_alternates_strictly() {
        let mut live = LivenessIndicator::default();
        let mut seen = vec![live.is_visible()];
        for _ in 0..6 {
            live.toggle();
            seen.push(live.is_visible());
        }
        assert_eq!(seen, vec![true, false, true, false, true, false, true]);
    }

    #[test]
    fn test_dots_cycle() {
        let mut dots = LoadingDots::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(dots.as_str());
            dots.advance();
        }
        assert_eq!(seen, vec!["", ".", "..", "...", ""]);
    }
}
