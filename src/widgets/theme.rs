use std::{env, sync::OnceLock, time::Duration};

use ratatui::style::Color;

const LUMA_THRESHOLD: f32 = 0.6;
// Some terminals report noisy or transient luma right after startup; take a few
// samples and use the median to avoid a single bad read flipping the theme.
const LUMA_SAMPLES: usize = 5;
const LUMA_SAMPLE_DELAY: Duration = Duration::from_millis(20);

#[derive(Clone, Copy)]
pub struct Theme {
    bg: Color,
    panel_bg: Color,
    panel_bg_alt: Color,
    text: Color,
    text_muted: Color,
    accent: Color,
    accent_alt: Color,
    border: Color,
    selection_bg: Color,
    selection_fg: Color,
    success: Color,
    warning: Color,
    error: Color,
}

impl Theme {
    /// Theme from the environment: `GAZETTEER_THEME` wins, then terminal
    /// background detection, then dark. Resolved once per process.
    pub fn default() -> Self {
        static THEME: OnceLock<Theme> = OnceLock::new();
        *THEME.get_or_init(|| {
            if let Ok(value) = env::var("GAZETTEER_THEME")
                && let Some(theme) = Self::named(&value)
            {
                return theme;
            }

            if let Some(luma) = detect_terminal_luma()
                && luma > LUMA_THRESHOLD
            {
                return Self::light();
            }

            Self::dark()
        })
    }

    pub fn named(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("light") {
            return Some(Self::light());
        }
        if name.eq_ignore_ascii_case("dark") {
            return Some(Self::dark());
        }
        None
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(14, 17, 23),
            panel_bg: Color::Rgb(20, 24, 32),
            panel_bg_alt: Color::Rgb(26, 31, 40),
            text: Color::Rgb(226, 232, 240),
            text_muted: Color::Rgb(140, 152, 170),
            accent: Color::Rgb(122, 196, 165),
            accent_alt: Color::Rgb(229, 192, 123),
            border: Color::Rgb(60, 70, 86),
            selection_bg: Color::Rgb(42, 57, 66),
            selection_fg: Color::Rgb(226, 232, 240),
            success: Color::Rgb(140, 201, 125),
            warning: Color::Rgb(222, 179, 100),
            error: Color::Rgb(235, 111, 115),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(249, 248, 245),
            panel_bg: Color::Rgb(255, 255, 255),
            panel_bg_alt: Color::Rgb(242, 242, 238),
            text: Color::Rgb(36, 41, 47),
            text_muted: Color::Rgb(101, 109, 122),
            accent: Color::Rgb(23, 110, 88),
            accent_alt: Color::Rgb(154, 90, 16),
            border: Color::Rgb(167, 173, 182),
            selection_bg: Color::Rgb(214, 235, 226),
            selection_fg: Color::Rgb(20, 28, 36),
            success: Color::Rgb(35, 134, 54),
            warning: Color::Rgb(154, 103, 0),
            error: Color::Rgb(199, 62, 29),
        }
    }

    pub fn bg(&self) -> Color {
        self.bg
    }

    pub fn panel_bg(&self) -> Color {
        self.panel_bg
    }

    pub fn panel_bg_alt(&self) -> Color {
        self.panel_bg_alt
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn text_muted(&self) -> Color {
        self.text_muted
    }

    pub fn accent(&self) -> Color {
        self.accent
    }

    pub fn accent_alt(&self) -> Color {
        self.accent_alt
    }

    pub fn border(&self) -> Color {
        self.border
    }

    pub fn selection_bg(&self) -> Color {
        self.selection_bg
    }

    pub fn selection_fg(&self) -> Color {
        self.selection_fg
    }

    pub fn success(&self) -> Color {
        self.success
    }

    pub fn warning(&self) -> Color {
        self.warning
    }

    pub fn error(&self) -> Color {
        self.error
    }
}

fn detect_terminal_luma() -> Option<f32> {
    let mut samples = Vec::with_capacity(LUMA_SAMPLES);
    for attempt in 0..LUMA_SAMPLES {
        if let Ok(luma) = terminal_light::luma()
            && luma.is_finite()
        {
            samples.push(luma);
        }
        if attempt + 1 < LUMA_SAMPLES {
            std::thread::sleep(LUMA_SAMPLE_DELAY);
        }
    }

    if samples.is_empty() {
        return None;
    }

    Some(median_luma(&mut samples))
}

fn median_luma(samples: &mut [f32]) -> f32 {
    samples.sort_by(|a, b| a.total_cmp(b));
    let mid = samples.len() / 2;
    if samples.len().is_multiple_of(2) {
        (samples[mid - 1] + samples[mid]) / 2.0
    } else {
        samples[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, median_luma};

    #[test]
    fn median_luma_odd() {
        let mut samples = [0.7_f32, 0.1_f32, 0.3_f32];
        let median = median_luma(&mut samples);
        assert!((median - 0.3).abs() < 1e-6);
    }

    #[test]
    fn median_luma_even() {
        let mut samples = [0.1_f32, 0.9_f32, 0.3_f32, 0.5_f32];
        let median = median_luma(&mut samples);
        assert!((median - 0.4).abs() < 1e-6);
    }

    #[test]
    fn named_themes_resolve_case_insensitively() {
        assert!(Theme::named("LIGHT").is_some());
        assert!(Theme::named("Dark").is_some());
        assert!(Theme::named("solarized").is_none());
    }
}
