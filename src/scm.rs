//! The git boundary: one `git describe` invocation, parsed into a [`Meta`].
//!
//! Everything here degrades to `None` rather than erroring, so a missing git
//! binary or an untagged repository means "no version info", not a crash.

use std::path::Path;
use std::process::{Command, Stdio};

use console::style;

use crate::meta::Meta;
use crate::version::tag_to_version;

/// Checks that an external command can run at all, warning on stderr when it
/// can't. A missing SCM tool degrades the pipeline to "no version info"
/// instead of failing it.
pub fn has_command(name: &str) -> bool {
    let found = Command::new(name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success());
    if !found {
        eprintln!(
            "{} command `{name}` was not found or failed to run",
            style("warning:").yellow().bold()
        );
    }
    found
}

/// Splits `git describe --long` output (`{tag}-{distance}-g{node}[-dirty]`)
/// into its parts. The tag itself may contain hyphens, so parsing works from
/// the right.
fn parse_describe(output: &str) -> Option<(&str, u64, &str, bool)> {
    let output = output.trim();
    let (output, dirty) = match output.strip_suffix("-dirty") {
        Some(rest) => (rest, true),
        None => (output, false),
    };
    let (rest, node) = output.rsplit_once('-')?;
    let node = node.strip_prefix('g')?;
    let (tag, distance) = rest.rsplit_once('-')?;
    Some((tag, distance.parse().ok()?, node, dirty))
}

/// Derives SCM metadata for the repository at `root` by running
/// `git describe` against the nearest version-looking tag.
///
/// Returns `None` when git is unavailable, the directory is not a work tree,
/// no tag matches, or the tag encodes no version. A describe distance of
/// zero collapses to "exactly on tag" (`distance: None`); the dirty flag is
/// preserved either way.
pub fn git_version(root: &Path) -> Option<Meta> {
    if !has_command("git") {
        return None;
    }
    let output = Command::new("git")
        .current_dir(root)
        .args(["describe", "--dirty", "--tags", "--long", "--match", "*[0-9]*"])
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout);
    let (tag, distance, node, dirty) = parse_describe(&described)?;
    let tag = tag_to_version(tag)?;
    let distance = (distance > 0).then_some(distance);
    Some(Meta::new(tag, distance, dirty).with_node(node))
}
