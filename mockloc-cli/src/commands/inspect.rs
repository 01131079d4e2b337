//! Script inspection command.

use std::path::PathBuf;

use clap::Args;

use mockloc::replay::ReplayScript;

use crate::error::CliError;

/// Arguments for the inspect command.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to the replay script (JSON)
    pub script: PathBuf,
}

/// Parse a script and print a summary.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let script = ReplayScript::from_path(&args.script)?;

    println!("Script: {}", args.script.display());
    println!("  Fixes:    {}", script.len());
    println!("  Duration: {:.1}s", script.duration().as_secs_f64());

    if let Some(bounds) = bounding_box(&script) {
        println!(
            "  Bounds:   lat {:.5}..{:.5}, lon {:.5}..{:.5}",
            bounds.0, bounds.1, bounds.2, bounds.3
        );
    }

    Ok(())
}

/// (min_lat, max_lat, min_lon, max_lon) over all fixes, if any.
fn bounding_box(script: &ReplayScript) -> Option<(f64, f64, f64, f64)> {
    let mut fixes = script.fixes().iter();
    let first = fixes.next()?;
    let mut bounds = (
        first.position.latitude,
        first.position.latitude,
        first.position.longitude,
        first.position.longitude,
    );

    for fix in fixes {
        bounds.0 = bounds.0.min(fix.position.latitude);
        bounds.1 = bounds.1.max(fix.position.latitude);
        bounds.2 = bounds.2.min(fix.position.longitude);
        bounds.3 = bounds.3.max(fix.position.longitude);
    }

    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockloc::position::Position;
    use mockloc::replay::ReplayFix;

    fn fix(lat: f64, lon: f64) -> ReplayFix {
        ReplayFix {
            offset_ms: 0,
            position: Position::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn test_bounding_box_spans_all_fixes() {
        let script =
            ReplayScript::new(vec![fix(1.0, -3.0), fix(-2.0, 5.0), fix(0.5, 0.0)]).unwrap();
        assert_eq!(bounding_box(&script), Some((-2.0, 1.0, -3.0, 5.0)));
    }

    #[test]
    fn test_bounding_box_empty_script() {
        let script = ReplayScript::new(vec![]).unwrap();
        assert_eq!(bounding_box(&script), None);
    }
}
