use crate::{
    error::{GolError, Result},
    grid::Dimensions,
};
use std::{path::PathBuf, time::Duration};

/// What to simulate and with how many workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    pub turns: usize,
    pub threads: usize,
    pub image_width: usize,
    pub image_height: usize,
}

impl Params {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.image_width, self.image_height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(GolError::InvalidParams("threads must be at least 1".into()));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(GolError::InvalidParams(format!(
                "dimensions must be positive, got {}",
                self.dimensions()
            )));
        }
        Ok(())
    }
}

/// Where images live and how the driver reports progress.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Directory holding `<W>x<H>.pgm` input images.
    pub images_dir: PathBuf,
    /// Directory for saved boards; `None` disables saving.
    pub out_dir: Option<PathBuf>,
    /// Cadence of `AliveCellsCount` reports.
    pub tick: Duration,
    /// Emit `CellsFlipped` diffs every turn.
    pub report_flips: bool,
}

impl RunOptions {
    pub const IMAGES_DIR: &'static str = "images";
    pub const OUT_DIR: &'static str = "out";
    pub const TICK: Duration = Duration::from_secs(2);

    /// A zero tick would make a paused run report in a busy loop.
    pub fn validate(&self) -> Result<()> {
        if self.tick.is_zero() {
            return Err(GolError::InvalidParams("tick must be positive".into()));
        }
        Ok(())
    }

    /// No saving, no diffs; used for in-memory runs.
    pub fn headless() -> Self {
        Self {
            out_dir: None,
            ..Self::default()
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from(Self::IMAGES_DIR),
            out_dir: Some(PathBuf::from(Self::OUT_DIR)),
            tick: Self::TICK,
            report_flips: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let params = Params {
            turns: 0,
            threads: 1,
            image_width: 16,
            image_height: 16,
        };
        assert!(params.validate().is_ok());
        assert!(Params { threads: 0, ..params }.validate().is_err());
        assert!(Params {
            image_height: 0,
            ..params
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(RunOptions::default().validate().is_ok());
        let options = RunOptions {
            tick: Duration::ZERO,
            ..RunOptions::headless()
        };
        assert!(matches!(
            options.validate(),
            Err(GolError::InvalidParams(_))
        ));
    }
}
