//! Reveal timing simulation command.
//!
//! Lays sections out on a [`ScrollViewport`], replays a list of scroll
//! offsets and reports which sections have been revealed after each one.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::reveal::{Rect, RevealRegion, RevealTracker, ScrollViewport};
use clap::Args;
use serde::Serialize;

/// Simulate section reveals for a sequence of scroll offsets
#[derive(Args, Debug)]
pub struct RevealArgs {
    /// Viewport width in pixels
    #[arg(long, default_value = "1280")]
    viewport_width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value = "800")]
    viewport_height: f64,

    /// Section as ID:TOP:HEIGHT in document pixels (repeatable)
    #[arg(long = "section", value_name = "ID:TOP:HEIGHT", required = true)]
    sections: Vec<String>,

    /// Scroll offset to visit, in order (repeatable)
    #[arg(long = "scroll", value_name = "Y")]
    scrolls: Vec<f64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Step {
    scroll: f64,
    sections: Vec<RevealRegion>,
}

/// A section parsed from `ID:TOP:HEIGHT`.
#[derive(Debug, Clone, PartialEq)]
struct SectionLayout {
    id: String,
    top: f64,
    height: f64,
}

fn parse_section(raw: &str) -> CliResult<SectionLayout> {
    let invalid = || {
        CliError::validation(format!(
            "Invalid section '{raw}'. Expected ID:TOP:HEIGHT, e.g. skills:1200:600"
        ))
    };

    let mut parts = raw.rsplitn(3, ':');
    let height = parts.next().ok_or_else(invalid)?;
    let top = parts.next().ok_or_else(invalid)?;
    let id = parts.next().ok_or_else(invalid)?;

    if id.is_empty() {
        return Err(invalid());
    }

    let top: f64 = top.trim().parse().map_err(|_| invalid())?;
    let height: f64 = height.trim().parse().map_err(|_| invalid())?;
    if !top.is_finite() || !height.is_finite() || height < 0.0 {
        return Err(invalid());
    }

    Ok(SectionLayout {
        id: id.to_string(),
        top,
        height,
    })
}

impl RevealArgs {
    /// Rejects viewport sizes and scroll offsets the geometry cannot use.
    fn validate(&self) -> CliResult<()> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.viewport_width) || !size_ok(self.viewport_height) {
            return Err(CliError::validation(
                "Viewport size must be a positive finite number",
            ));
        }

        if let Some(bad) = self.scrolls.iter().find(|y| !y.is_finite()) {
            return Err(CliError::validation(format!(
                "Scroll offset must be a finite number, got {bad}"
            )));
        }
        Ok(())
    }

    /// Execute the reveal simulation
    pub fn execute(&self) -> CliResult<()> {
        self.validate()?;

        let layouts = self
            .sections
            .iter()
            .map(|raw| parse_section(raw))
            .collect::<CliResult<Vec<_>>>()?;

        let viewport = ScrollViewport::new(self.viewport_width, self.viewport_height);
        let mut tracker = RevealTracker::new(viewport);
        for layout in &layouts {
            let rect = Rect::new(0.0, layout.top, self.viewport_width, layout.height);
            tracker.register_region(layout.id.clone(), Some(&rect));
        }

        let mut steps = Vec::with_capacity(self.scrolls.len() + 1);
        tracker.observer_mut().flush();
        steps.push(Step {
            scroll: tracker.observer().scroll_y(),
            sections: tracker.regions(),
        });

        for &offset in &self.scrolls {
            tracker.observer_mut().scroll_to(offset);
            steps.push(Step {
                scroll: tracker.observer().scroll_y(),
                sections: tracker.regions(),
            });
        }

        if self.json {
            return print_json(&steps);
        }

        for step in &steps {
            let revealed: Vec<&str> = step
                .sections
                .iter()
                .filter(|s| s.visible)
                .map(|s| s.id.as_str())
                .collect();
            let shown = if revealed.is_empty() {
                "-".to_string()
            } else {
                revealed.join(", ")
            };
            println!("scroll {:>7.0}: {}", step.scroll, shown);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        let layout = parse_section("skills:1200:600").unwrap();
        assert_eq!(layout.id, "skills");
        assert!((layout.top - 1200.0).abs() < f64::EPSILON);
        assert!((layout.height - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_section_id_may_contain_colons() {
        let layout = parse_section("page:contact:3000:400").unwrap();
        assert_eq!(layout.id, "page:contact");
    }

    fn args(width: f64, scrolls: Vec<f64>) -> RevealArgs {
        RevealArgs {
            viewport_width: width,
            viewport_height: 800.0,
            sections: vec!["skills:1400:600".to_string()],
            scrolls,
            json: true,
        }
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        assert!(args(1280.0, vec![0.0, 710.0]).validate().is_ok());
        assert!(args(1280.0, vec![f64::INFINITY]).validate().is_err());
        assert!(args(1280.0, vec![10.0, f64::NAN]).validate().is_err());
        assert!(args(f64::INFINITY, vec![]).validate().is_err());
        assert!(args(0.0, vec![]).validate().is_err());
    }

    #[test]
    fn test_parse_section_invalid() {
        assert!(parse_section("skills").is_err());
        assert!(parse_section("skills:abc:100").is_err());
        assert!(parse_section(":10:100").is_err());
        assert!(parse_section("skills:10:-5").is_err());
    }
}
