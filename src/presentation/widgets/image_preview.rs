//! Terminal image protocols for gallery slots and the enlarged view.

use std::collections::HashMap;

use ratatui_image::picker::{Capability, Picker, ProtocolType};
use ratatui_image::protocol::StatefulProtocol;

use crate::domain::entities::{ImageId, LoadedImage, SlotId};

/// Owns the picker and one resize protocol per displayed image.
///
/// Protocols are built lazily on first render and dropped on reload.
pub struct ImageManager {
    picker: Picker,
    slots: HashMap<SlotId, StatefulProtocol>,
    enlarged: Option<(ImageId, StatefulProtocol)>,
}

impl ImageManager {
    /// Queries the terminal for graphics support, falling back to halfblocks.
    #[must_use]
    pub fn new() -> Self {
        let mut picker = Picker::from_query_stdio().unwrap_or_else(|_| Picker::halfblocks());

        let caps = picker.capabilities();
        let has_sixel = caps.iter().any(|c| matches!(c, Capability::Sixel));
        let has_kitty = caps.iter().any(|c| matches!(c, Capability::Kitty));

        if has_sixel && !has_kitty && picker.protocol_type() == ProtocolType::Halfblocks {
            picker.set_protocol_type(ProtocolType::Sixel);
        }

        Self::with_picker(picker)
    }

    /// Manager that always renders with unicode halfblocks.
    #[must_use]
    pub fn halfblocks() -> Self {
        Self::with_picker(Picker::halfblocks())
    }

    fn with_picker(picker: Picker) -> Self {
        Self {
            picker,
            slots: HashMap::new(),
            enlarged: None,
        }
    }

    /// Returns the active protocol type.
    #[must_use]
    pub fn protocol_type(&self) -> ProtocolType {
        self.picker.protocol_type()
    }

    /// Protocol for a slot's thumbnail, created on first use.
    pub fn slot_protocol(&mut self, slot: SlotId, image: &LoadedImage) -> &mut StatefulProtocol {
        let picker = &self.picker;
        self.slots
            .entry(slot)
            .or_insert_with(|| picker.new_resize_protocol((*image.image).clone()))
    }

    /// Protocol for the enlarged image. Replaced when a different image is opened.
    pub fn enlarged_protocol(&mut self, image: &LoadedImage) -> &mut StatefulProtocol {
        if self.enlarged.as_ref().is_some_and(|(id, _)| *id != image.id) {
            self.enlarged = None;
        }
        let picker = &self.picker;
        let (_, protocol) = self.enlarged.get_or_insert_with(|| {
            (
                image.id.clone(),
                picker.new_resize_protocol((*image.image).clone()),
            )
        });
        protocol
    }

    /// Drops the enlarged-view protocol.
    pub fn close_enlarged(&mut self) {
        self.enlarged = None;
    }

    /// Drops every protocol. Slot ids are reused after a reload.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.enlarged = None;
    }

    /// Number of slot protocols held.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl Default for ImageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageManager")
            .field("protocol_type", &self.picker.protocol_type())
            .field("slots", &self.slots.len())
            .field("enlarged", &self.enlarged.as_ref().map(|(id, _)| id))
            .finish()
    }
}
