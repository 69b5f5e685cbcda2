//! Copying translations of baseline keys between a server and an app file.

use crate::baseline::Baseline;
use crate::error::Result;
use crate::resource::{ResourceFile, ResourceMap};
use std::path::Path;
use tracing::info;

/// Keys added to each side by one propagation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PropagateCounts {
    pub server_added: usize,
    pub app_added: usize,
}

/// Fill each side with the other's translations of baseline keys it lacks.
///
/// Existing translations are never replaced, and keys outside the baseline are
/// never copied.
pub fn propagate(
    baseline: &Baseline,
    server: &mut ResourceMap,
    app: &mut ResourceMap,
) -> PropagateCounts {
    let app_added = fill_missing(baseline, server, app);
    let server_added = fill_missing(baseline, app, server);

    PropagateCounts {
        server_added,
        app_added,
    }
}

fn fill_missing(baseline: &Baseline, from: &ResourceMap, to: &mut ResourceMap) -> usize {
    let mut added = 0;
    for (key, value) in from {
        if baseline.contains(key) && !to.contains_key(key) {
            to.insert(key.clone(), value.clone());
            added += 1;
        }
    }
    added
}

/// Propagate between two resource files and rewrite both in canonical form.
pub fn propagate_files(
    baseline: &Baseline,
    server_path: &Path,
    app_path: &Path,
) -> Result<PropagateCounts> {
    let mut server = ResourceFile::load(server_path)?;
    let mut app = ResourceFile::load(app_path)?;

    let counts = propagate_loaded(baseline, &mut server, &mut app);

    server.save(false)?;
    app.save(false)?;
    Ok(counts)
}

pub(crate) fn propagate_loaded(
    baseline: &Baseline,
    server: &mut ResourceFile,
    app: &mut ResourceFile,
) -> PropagateCounts {
    let counts = propagate(baseline, server.entries_mut(), app.entries_mut());
    if counts != PropagateCounts::default() {
        info!(
            file = %server.path().display(),
            app_added = counts.app_added,
            server_added = counts.server_added,
            "propagated translations"
        );
    }
    counts
}
