//! Fonts: a named, ordered list of glyphs sharing one line height.
//!
//! Glyphs refer to each other by list index in their horizontal offset
//! pairs (`offset_x`, `(glyph index, offset)`). Every operation that
//! reorders the list rewrites those indices so they keep pointing at the
//! same glyphs.

use std::path::{Path, PathBuf};

use crate::{EngineError, Glyph, Result};

/// Stable identity of a glyph inside one [`Font`], unaffected by moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphKey(u32);

impl GlyphKey {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for GlyphKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "glyph#{}", self.0)
    }
}

/// Where [`Font::move_glyphs`] puts a selection.
///
/// The relative moves stop at the ends of the list; `To` fails when the
/// selection does not fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphMove {
    ToTop,
    Up,
    Down,
    ToBottom,
    /// Put the first selected glyph at this index.
    To(usize),
}

#[derive(Clone, Debug)]
struct FontEntry {
    key: GlyphKey,
    glyph: Glyph,
}

#[derive(Clone, Debug)]
pub struct Font {
    name: String,
    height: i32,
    path: Option<PathBuf>,
    entries: Vec<FontEntry>,
    next_key: u32,
    is_dirty: bool,
}

impl Font {
    pub fn new(name: impl Into<String>, height: i32) -> Self {
        Self {
            name: name.into(),
            height,
            path: None,
            entries: Vec::new(),
            next_key: 0,
            is_dirty: false,
        }
    }

    /// Font as it was loaded, not dirty.
    pub fn from_glyphs(name: impl Into<String>, height: i32, glyphs: impl IntoIterator<Item = Glyph>) -> Self {
        let mut font = Self::new(name, height);
        for glyph in glyphs {
            font.push(glyph);
        }
        font
    }

    fn push(&mut self, glyph: Glyph) -> GlyphKey {
        let key = GlyphKey(self.next_key);
        self.next_key += 1;
        self.entries.push(FontEntry { key, glyph });
        key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name == self.name {
            return false;
        }
        self.name = name;
        self.is_dirty = true;
        true
    }

    /// Line height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_height(&mut self, height: i32) -> Result<bool> {
        if height < 0 {
            return Err(EngineError::invalid_argument(format!("font height {height} is negative")));
        }
        if height == self.height {
            return Ok(false);
        }
        self.height = height;
        self.is_dirty = true;
        Ok(true)
    }

    /// File the font was loaded from or last saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Returns whether the flag changed.
    pub fn set_dirty(&mut self, is_dirty: bool) -> bool {
        let changed = self.is_dirty != is_dirty;
        self.is_dirty = is_dirty;
        changed
    }

    pub fn mark_saved(&mut self) -> bool {
        self.set_dirty(false)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Glyph list
    // ═══════════════════════════════════════════════════════════════════════

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.entries.iter().map(|e| &e.glyph)
    }

    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.entries.get(index).map(|e| &e.glyph)
    }

    pub fn glyph_mut(&mut self, index: usize) -> Option<&mut Glyph> {
        self.entries.get_mut(index).map(|e| &mut e.glyph)
    }

    pub fn key_at(&self, index: usize) -> Option<GlyphKey> {
        self.entries.get(index).map(|e| e.key)
    }

    pub fn index_of(&self, key: GlyphKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn glyph_by_key(&self, key: GlyphKey) -> Option<&Glyph> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.glyph)
    }

    pub fn glyph_by_key_mut(&mut self, key: GlyphKey) -> Option<&mut Glyph> {
        self.entries.iter_mut().find(|e| e.key == key).map(|e| &mut e.glyph)
    }

    /// Append `glyph` at the end of the list.
    pub fn add_glyph(&mut self, glyph: Glyph) -> GlyphKey {
        let key = self.push(glyph);
        self.is_dirty = true;
        key
    }

    /// Remove the glyphs at `indices` and return them in list order.
    ///
    /// Offset pairs that pointed at a removed glyph are dropped, the others
    /// follow their glyph to its new index. Nothing changes if an index is
    /// out of range.
    pub fn remove_glyphs(&mut self, indices: &[usize]) -> Result<Vec<(GlyphKey, Glyph)>> {
        let selection = self.selection(indices)?;
        if selection.is_empty() {
            return Ok(Vec::new());
        }

        let old = std::mem::take(&mut self.entries);
        let mut index_map = vec![None; old.len()];
        let mut removed = Vec::with_capacity(selection.len());
        for (index, entry) in old.into_iter().enumerate() {
            if selection.binary_search(&index).is_ok() {
                removed.push((entry.key, entry.glyph));
            } else {
                index_map[index] = Some(self.entries.len());
                self.entries.push(entry);
            }
        }
        self.remap_offsets(&index_map);
        self.is_dirty = true;
        log::debug!("removed {} glyph(s) from font '{}'", removed.len(), self.name);
        Ok(removed)
    }

    /// Move the glyphs at `indices` so the first lands on the target
    /// index, keeping their spacing. Glyphs in the way fill the remaining
    /// slots in their previous order.
    ///
    /// Returns `false` when nothing moved.
    pub fn move_glyphs(&mut self, indices: &[usize], target: GlyphMove) -> Result<bool> {
        let selection = self.selection(indices)?;
        let (Some(&first), Some(&last)) = (selection.first(), selection.last()) else {
            return Ok(false);
        };
        let len = self.entries.len();
        // signed shift of every selected glyph, limited so the last one stays in the list
        let max_down = (len - 1 - last) as isize;
        let max_up = -(first as isize);
        let shift = match target {
            GlyphMove::ToTop => max_up,
            GlyphMove::Up => (-1isize).max(max_up),
            GlyphMove::Down => 1isize.min(max_down),
            GlyphMove::ToBottom => max_down,
            GlyphMove::To(index) => {
                let shift = index as isize - first as isize;
                if index >= len || shift > max_down {
                    return Err(EngineError::invalid_argument(format!(
                        "cannot move {} glyph(s) to index {index} of {len}",
                        selection.len()
                    )));
                }
                shift
            }
        };
        if shift == 0 {
            return Ok(false);
        }

        let mut slots: Vec<Option<FontEntry>> = (0..len).map(|_| None).collect();
        let mut index_map = vec![None; len];
        let mut rest = Vec::with_capacity(len - selection.len());
        for (index, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if selection.binary_search(&index).is_ok() {
                let new_index = (index as isize + shift) as usize;
                index_map[index] = Some(new_index);
                slots[new_index] = Some(entry);
            } else {
                rest.push((index, entry));
            }
        }
        let mut free = (0..len).filter(|i| slots[*i].is_none()).collect::<Vec<_>>().into_iter();
        for (index, entry) in rest {
            if let Some(new_index) = free.next() {
                index_map[index] = Some(new_index);
                slots[new_index] = Some(entry);
            }
        }
        self.entries = slots.into_iter().flatten().collect();
        self.remap_offsets(&index_map);
        self.is_dirty = true;
        Ok(true)
    }

    /// Sorted, deduplicated copy of `indices`, all of them in range.
    fn selection(&self, indices: &[usize]) -> Result<Vec<usize>> {
        let mut selection = indices.to_vec();
        selection.sort_unstable();
        selection.dedup();
        if let Some(&index) = selection.iter().find(|i| **i >= self.entries.len()) {
            return Err(EngineError::invalid_argument(format!("glyph index {index} out of range 0..{}", self.entries.len())));
        }
        Ok(selection)
    }

    fn remap_offsets(&mut self, index_map: &[Option<usize>]) {
        for entry in &mut self.entries {
            if entry.glyph.offset_x().is_empty() {
                continue;
            }
            let remapped = entry
                .glyph
                .offset_x()
                .iter()
                .filter_map(|&(index, offset)| match usize::try_from(index).ok().and_then(|i| index_map.get(i)) {
                    Some(Some(new_index)) => Some((*new_index as i32, offset)),
                    Some(None) => None,
                    // indices outside the list are not ours to fix
                    None => Some((index, offset)),
                })
                .collect();
            entry.glyph.set_offset_x(remapped);
        }
    }

    pub fn into_glyphs(self) -> Vec<Glyph> {
        self.entries.into_iter().map(|e| e.glyph).collect()
    }
}
