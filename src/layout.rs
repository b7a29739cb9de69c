//! Group layout files
//!
//! Uses RON (Rusty Object Notation) so layouts stay hand-editable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cel::{Cel, CelArena, CelId};
use crate::error::{LayoutError, Result};
use crate::geometry::Point;
use crate::group::{CelGroup, MemberConfig};

/// One member of a layout: the cel to create and where it sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLayout {
    /// Declared cel size, pixels
    pub width: i32,
    pub height: i32,
    /// Offset inside the group frame
    #[serde(default)]
    pub offset: Point,
    /// Bitmap file for the viewer, relative to the layout file
    #[serde(default)]
    pub bitmap: Option<String>,
}

/// A group and its members as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLayout {
    pub position: Point,
    pub size: Point,
    pub members: Vec<MemberLayout>,
}

impl GroupLayout {
    /// Create one cel per member in `arena` and a group holding them, member
    /// `i` in slot `i`. Returns the group and the new cel ids in member order.
    pub fn build(&self, arena: &mut CelArena) -> Result<(CelGroup, Vec<CelId>)> {
        let mut group = CelGroup::new(self.position, self.size, self.members.len())?;

        let ids: Vec<CelId> = self
            .members
            .iter()
            .map(|m| arena.insert(Cel::new(m.width, m.height)))
            .collect();

        let configs: Vec<MemberConfig> = self
            .members
            .iter()
            .zip(&ids)
            .enumerate()
            .map(|(index, (m, id))| MemberConfig::new(index, *id, m.offset.x, m.offset.y))
            .collect();
        group.configure_members(arena, &configs)?;

        debug!(members = ids.len(), "built group from layout");
        Ok((group, ids))
    }
}

/// Load a layout from a RON file
pub fn load_layout<P: AsRef<Path>>(path: P) -> std::result::Result<GroupLayout, LayoutError> {
    let contents = fs::read_to_string(path)?;
    load_layout_from_str(&contents)
}

/// Load a layout from a RON string (embedded layouts, tests)
pub fn load_layout_from_str(s: &str) -> std::result::Result<GroupLayout, LayoutError> {
    Ok(ron::from_str(s)?)
}

/// Save a layout to a RON file
pub fn save_layout<P: AsRef<Path>>(layout: &GroupLayout, path: P) -> std::result::Result<(), LayoutError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(layout, config)?;
    fs::write(path, contents)?;
    Ok(())
}
