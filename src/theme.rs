//! Light and dark theme prologues
//!
//! Diagrams never carry colors of their own. They reference a small, fixed set
//! of named D2 classes (`queued`, `running`, `dependency-edge`, ...) and the
//! theme prologue prepended before rendering supplies the class definitions.
//! Switching between light and dark therefore only swaps the prologue.

use std::collections::BTreeSet;
use std::fmt;

/// Task state classes every theme must define
pub const STATE_CLASSES: [&str; 5] = ["queued", "running", "computed", "failed", "skipped"];

/// All classes a diagram body may reference
pub const STYLE_CLASSES: [&str; 9] = [
    "optional",
    "queued",
    "running",
    "computed",
    "failed",
    "skipped",
    "subtask-edge",
    "dependency-edge",
    "diagram-title",
];

const LIGHT_PROLOGUE: &str = r##"vars: {
  d2-config: {
    layout-engine: elk
    theme-id: 0
    sketch: true
    pad: 20
  }
}

style.fill: "#fcf9fa"

classes: {
  optional: {
    style: {
      opacity: 0.6
      stroke-dash: 3
    }
  }
  queued: {
    style: {
      fill: "#FFE099"
      stroke: "#A37200"
      font-color: "#3D2B00"
    }
  }
  running: {
    style: {
      fill: "#AED0D5"
      stroke: "#3E7079"
      font-color: "#16292C"
    }
  }
  computed: {
    style: {
      fill: "#C7E6C9"
      stroke: "#265429"
      font-color: "#0F2411"
    }
  }
  failed: {
    style: {
      fill: "#FF9785"
      stroke: "#A31800"
      font-color: "#3D0900"
    }
  }
  skipped: {
    style: {
      fill: "#E0E0E0"
      stroke: "#5C5C5C"
      font-color: "#2B2B2B"
    }
  }
  subtask-edge: {
    style: {
      stroke: "#3D3D3D"
    }
  }
  dependency-edge: {
    style: {
      stroke: "#D1342B"
      stroke-dash: 3
    }
  }
  diagram-title: {
    shape: text
    near: top-center
    style: {
      font-size: 24
      font-color: black
      bold: true
    }
  }
}
"##;

const DARK_PROLOGUE: &str = r##"vars: {
  d2-config: {
    layout-engine: elk
    theme-id: 0
    sketch: true
    pad: 20
  }
}

style.fill: "#161416"

classes: {
  optional: {
    style: {
      opacity: 0.6
      stroke-dash: 3
    }
  }
  queued: {
    style: {
      fill: "#A37200"
      stroke: "#FFE099"
      font-color: white
    }
  }
  running: {
    style: {
      fill: "#3E7079"
      stroke: "#AED0D5"
      font-color: white
    }
  }
  computed: {
    style: {
      fill: "#265429"
      stroke: "#C7E6C9"
      font-color: white
    }
  }
  failed: {
    style: {
      fill: "#A31800"
      stroke: "#FF9785"
      font-color: white
    }
  }
  skipped: {
    style: {
      fill: "#5C5C5C"
      stroke: "#E0E0E0"
      font-color: white
    }
  }
  subtask-edge: {
    style: {
      stroke: white
    }
  }
  dependency-edge: {
    style: {
      stroke: "#F97F76"
      stroke-dash: 3
    }
  }
  diagram-title: {
    shape: text
    near: top-center
    style: {
      font-size: 24
      font-color: white
      bold: true
    }
  }
}
"##;

/// One of the two fixed rendering themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Both themes, in the order they are rendered
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    /// The D2 prologue defining this theme's classes and renderer settings
    pub fn prologue(self) -> &'static str {
        match self {
            Theme::Light => LIGHT_PROLOGUE,
            Theme::Dark => DARK_PROLOGUE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Suffix inserted between the diagram stem and `.svg`
    pub fn file_suffix(self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => ".dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collect the class names declared directly inside a prologue's `classes` block
///
/// Only first-level keys are returned; nested `style` maps are skipped.
pub fn declared_classes(prologue: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut depth: Option<usize> = None;

    for line in prologue.lines() {
        let trimmed = line.trim();
        let Some(current) = depth else {
            if trimmed.starts_with("classes:") && trimmed.ends_with('{') {
                depth = Some(1);
            }
            continue;
        };

        if current == 1 {
            if let Some((key, rest)) = trimmed.split_once(':') {
                if rest.trim_start().starts_with('{') {
                    names.insert(key.trim().to_string());
                }
            }
        }

        let opened = trimmed.matches('{').count();
        let closed = trimmed.matches('}').count();
        let next = (current + opened).saturating_sub(closed);
        depth = if next == 0 { None } else { Some(next) };
        if depth.is_none() {
            break;
        }
    }

    names
}
