//! A fish's full coloration genome.
//!
//! Wire layout: for each listed layer its id byte followed by its fields, then a
//! zero byte, then the base, body shape and fin shape fields.

use koi_core::{BinBuffer, CodecError, Decode, Encode, PaletteIndex};
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerBase, LayerId, LayerShapeBody, LayerShapeFin};

const LAYER_LIST_END: u8 = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub base: LayerBase,
    /// Later layers paint over earlier ones. Only spots, stripes, ridge and web belong here.
    pub layers: Vec<Layer>,
    pub shape_body: LayerShapeBody,
    pub shape_fin: LayerShapeFin,
}

impl Pattern {
    pub fn new(
        base: LayerBase,
        layers: Vec<Layer>,
        shape_body: LayerShapeBody,
        shape_fin: LayerShapeFin,
    ) -> Self {
        Self {
            base,
            layers,
            shape_body,
            shape_fin,
        }
    }

    /// Layer at a footprint position: 0 is the base, `n` is `layers[n - 1]`.
    pub fn layer_at(&self, position: usize) -> Option<Layer> {
        match position {
            0 => Some(Layer::Base(self.base)),
            n => self.layers.get(n - 1).cloned(),
        }
    }

    /// Palette colors of the base followed by every listed layer.
    pub fn palette_indices(&self) -> Vec<PaletteIndex> {
        std::iter::once(self.base.palette_index)
            .chain(self.layers.iter().filter_map(Layer::palette_index))
            .collect()
    }
}

impl Encode for Pattern {
    fn encode(&self, buffer: &mut BinBuffer) {
        for layer in &self.layers {
            buffer.write_u8(layer.id().wire());
            layer.encode(buffer);
        }
        buffer.write_u8(LAYER_LIST_END);

        self.base.encode(buffer);
        self.shape_body.encode(buffer);
        self.shape_fin.encode(buffer);
    }
}

impl Decode for Pattern {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let mut layers = Vec::new();

        loop {
            let byte = buffer.read_u8()?;
            if byte == LAYER_LIST_END {
                break;
            }

            let id = match LayerId::from_wire(byte) {
                Some(id) if id.is_listed() => id,
                _ => {
                    tracing::error!(layer_id = byte, "unknown layer id in pattern");
                    return Err(CodecError::UnknownLayer(byte));
                }
            };
            layers.push(Layer::decode_as(id, buffer)?);
        }

        Ok(Self {
            base: LayerBase::decode(buffer)?,
            layers,
            shape_body: LayerShapeBody::decode(buffer)?,
            shape_fin: LayerShapeFin::decode(buffer)?,
        })
    }
}
