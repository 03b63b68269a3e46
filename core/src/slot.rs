//! Current texture of one surface, keyed against stale decodes.
//!
//! Image decoding finishes out of order with selection changes. Each decode
//! is issued a ticket carrying the slot generation at the time it started; a
//! result whose ticket is no longer current is dropped instead of applied.

use tracing::{debug, warn};

use crate::error::TextureError;
use crate::pipeline::RenderableTexture;

/// Proof of which selection a decode was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeTicket {
    generation: u64,
    selection: String,
}

impl DecodeTicket {
    pub fn selection(&self) -> &str {
        &self.selection
    }
}

/// Outcome of resolving a ticket.
#[derive(Debug)]
pub enum SlotUpdate {
    /// New texture installed; the superseded one is returned for release.
    Applied { released: Option<RenderableTexture> },
    /// A newer selection was made since the ticket was issued.
    Stale,
    /// Decode failed; the previous texture stays in place.
    Failed(TextureError),
}

/// Texture currently shown on a surface.
#[derive(Debug, Default)]
pub struct TextureSlot {
    generation: u64,
    pending: Option<String>,
    current: Option<RenderableTexture>,
}

impl TextureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&RenderableTexture> {
        self.current.as_ref()
    }

    /// Selection whose decode is in flight, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Start a decode for `selection`, invalidating earlier tickets.
    pub fn begin(&mut self, selection: impl Into<String>) -> DecodeTicket {
        self.generation += 1;
        let selection = selection.into();
        self.pending = Some(selection.clone());
        DecodeTicket {
            generation: self.generation,
            selection,
        }
    }

    /// Apply a finished decode if its ticket is still current.
    pub fn resolve(
        &mut self,
        ticket: DecodeTicket,
        result: Result<RenderableTexture, TextureError>,
    ) -> SlotUpdate {
        if ticket.generation != self.generation {
            debug!(selection = %ticket.selection, "discarding stale texture");
            return SlotUpdate::Stale;
        }
        self.pending = None;

        match result {
            Ok(texture) => SlotUpdate::Applied {
                released: self.current.replace(texture),
            },
            Err(err) => {
                warn!(selection = %ticket.selection, error = %err, "keeping previous texture");
                SlotUpdate::Failed(err)
            }
        }
    }

    /// Take the current texture out, e.g. when the surface switches to paint.
    pub fn clear(&mut self) -> Option<RenderableTexture> {
        self.generation += 1;
        self.pending = None;
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::WrapMode;
    use crate::raster::Raster;
    use crate::repeat::RepeatFactors;

    fn texture(x: f64) -> RenderableTexture {
        RenderableTexture {
            raster: Raster::Blank {
                width: 1,
                height: 1,
            },
            repeat: RepeatFactors { x, y: 1.0 },
            wrap: (WrapMode::Repeat, WrapMode::Repeat),
            grout_baked: false,
        }
    }

    fn decode_error() -> TextureError {
        crate::pipeline::decode_tile(b"garbage").unwrap_err()
    }

    #[test]
    fn test_applies_current_ticket() {
        let mut slot = TextureSlot::new();
        let ticket = slot.begin("1");
        assert_eq!(slot.pending(), Some("1"));

        match slot.resolve(ticket, Ok(texture(2.0))) {
            SlotUpdate::Applied { released } => assert!(released.is_none()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(slot.current().unwrap().repeat.x, 2.0);
        assert_eq!(slot.pending(), None);
    }

    #[test]
    fn test_stale_decode_is_discarded() {
        let mut slot = TextureSlot::new();
        let old = slot.begin("1");
        let new = slot.begin("2");

        assert!(matches!(slot.resolve(old, Ok(texture(1.0))), SlotUpdate::Stale));
        assert!(slot.current().is_none());
        assert_eq!(slot.pending(), Some("2"));

        assert!(matches!(slot.resolve(new, Ok(texture(2.0))), SlotUpdate::Applied { .. }));
        assert_eq!(slot.current().unwrap().repeat.x, 2.0);
    }

    #[test]
    fn test_superseded_texture_is_released() {
        let mut slot = TextureSlot::new();
        let first = slot.begin("1");
        slot.resolve(first, Ok(texture(1.0)));
        let second = slot.begin("2");

        match slot.resolve(second, Ok(texture(2.0))) {
            SlotUpdate::Applied { released } => assert_eq!(released.unwrap().repeat.x, 1.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_failure_keeps_previous() {
        let mut slot = TextureSlot::new();
        let first = slot.begin("1");
        slot.resolve(first, Ok(texture(1.0)));

        let broken = slot.begin("broken");
        assert!(matches!(slot.resolve(broken, Err(decode_error())), SlotUpdate::Failed(_)));
        assert_eq!(slot.current().unwrap().repeat.x, 1.0);
    }

    #[test]
    fn test_clear_invalidates_pending() {
        let mut slot = TextureSlot::new();
        let ticket = slot.begin("1");
        assert!(slot.clear().is_none());
        assert!(matches!(slot.resolve(ticket, Ok(texture(1.0))), SlotUpdate::Stale));
    }
}
