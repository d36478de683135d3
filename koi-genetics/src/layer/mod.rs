//! Pattern layers: one visual generator each.
//!
//! The set of variants is closed. Base and the two shape layers occupy fixed
//! slots in a `Pattern`; spots, stripes, ridge and web make up its ordered layer list.

mod base;
mod ridge;
mod shape;
mod spots;
mod stripes;
mod web;

pub use base::LayerBase;
pub use ridge::{LayerRidge, RidgeParameters};
pub use shape::{FinParameters, LayerShapeBody, LayerShapeFin};
pub use spots::{LayerSpots, SpotsParameters};
pub use stripes::{LayerStripes, StripesParameters};
pub use web::{LayerWeb, WebParameters};

use koi_core::{BinBuffer, CodecError, Decode, Encode, PaletteIndex, Plane, Randomizer};
use serde::{Deserialize, Serialize};

/// Variant tag of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerId {
    Base,
    Spots,
    Stripes,
    Ridge,
    Web,
    ShapeBody,
    ShapeFin,
}

impl LayerId {
    /// Byte written before each entry of a pattern's layer list. Zero ends the list.
    pub fn wire(self) -> u8 {
        match self {
            LayerId::Spots => 1,
            LayerId::Ridge => 2,
            LayerId::Stripes => 3,
            LayerId::Web => 4,
            LayerId::Base => 5,
            LayerId::ShapeBody => 6,
            LayerId::ShapeFin => 7,
        }
    }

    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(LayerId::Spots),
            2 => Some(LayerId::Ridge),
            3 => Some(LayerId::Stripes),
            4 => Some(LayerId::Web),
            5 => Some(LayerId::Base),
            6 => Some(LayerId::ShapeBody),
            7 => Some(LayerId::ShapeFin),
            _ => None,
        }
    }

    /// Whether layers of this kind live in a pattern's ordered layer list.
    pub fn is_listed(self) -> bool {
        matches!(
            self,
            LayerId::Spots | LayerId::Stripes | LayerId::Ridge | LayerId::Web
        )
    }

    pub fn flags(self) -> LayerFlags {
        match self {
            LayerId::Base => LayerFlags::OVERLAPS,
            LayerId::Spots | LayerId::Stripes | LayerId::Web => {
                LayerFlags::ALLOW_OVERLAP | LayerFlags::OVERLAPS
            }
            LayerId::Ridge => LayerFlags::ALLOW_OVERLAP | LayerFlags::RECESSIVE,
            LayerId::ShapeBody | LayerId::ShapeFin => LayerFlags::NONE,
        }
    }

    /// Exponent applied to a uniform draw when two layers fight for one slot.
    /// Lower values push the score up, making the layer more dominant.
    pub fn dominance(self) -> f64 {
        match self {
            LayerId::Stripes => 0.9,
            LayerId::Ridge => 0.65,
            LayerId::Web => 0.8,
            _ => 1.0,
        }
    }
}

/// Overlap behaviour consumed by the palette tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerFlags(u8);

impl LayerFlags {
    pub const NONE: LayerFlags = LayerFlags(0);
    pub const ALLOW_OVERLAP: LayerFlags = LayerFlags(0x01);
    pub const OVERLAPS: LayerFlags = LayerFlags(0x02);
    pub const RECESSIVE: LayerFlags = LayerFlags(0x04);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: LayerFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for LayerFlags {
    type Output = LayerFlags;

    fn bitor(self, rhs: LayerFlags) -> LayerFlags {
        LayerFlags(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum Layer {
    Base(LayerBase),
    Spots(LayerSpots),
    Stripes(LayerStripes),
    Ridge(LayerRidge),
    Web(LayerWeb),
    ShapeBody(LayerShapeBody),
    ShapeFin(LayerShapeFin),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Base(_) => LayerId::Base,
            Layer::Spots(_) => LayerId::Spots,
            Layer::Stripes(_) => LayerId::Stripes,
            Layer::Ridge(_) => LayerId::Ridge,
            Layer::Web(_) => LayerId::Web,
            Layer::ShapeBody(_) => LayerId::ShapeBody,
            Layer::ShapeFin(_) => LayerId::ShapeFin,
        }
    }

    /// Palette color of this layer. Shape layers carry none.
    pub fn palette_index(&self) -> Option<PaletteIndex> {
        match self {
            Layer::Base(layer) => Some(layer.palette_index),
            Layer::Spots(layer) => Some(layer.palette_index),
            Layer::Stripes(layer) => Some(layer.palette_index),
            Layer::Ridge(layer) => Some(layer.palette_index),
            Layer::Web(layer) => Some(layer.palette_index),
            Layer::ShapeBody(_) | Layer::ShapeFin(_) => None,
        }
    }

    /// Mutable handle on the palette color, if the variant has one.
    pub fn palette_index_mut(&mut self) -> Option<&mut PaletteIndex> {
        match self {
            Layer::Base(layer) => Some(&mut layer.palette_index),
            Layer::Spots(layer) => Some(&mut layer.palette_index),
            Layer::Stripes(layer) => Some(&mut layer.palette_index),
            Layer::Ridge(layer) => Some(&mut layer.palette_index),
            Layer::Web(layer) => Some(&mut layer.palette_index),
            Layer::ShapeBody(_) | Layer::ShapeFin(_) => None,
        }
    }

    pub fn plane(&self) -> Option<&Plane> {
        match self {
            Layer::Spots(layer) => Some(&layer.plane),
            Layer::Stripes(layer) => Some(&layer.plane),
            Layer::Ridge(layer) => Some(&layer.plane),
            Layer::Web(layer) => Some(&layer.plane),
            _ => None,
        }
    }

    pub fn flags(&self) -> LayerFlags {
        self.id().flags()
    }

    pub fn is_recessive(&self) -> bool {
        self.flags().contains(LayerFlags::RECESSIVE)
    }

    /// Score used to settle a slot between two layers of different kinds.
    /// Consumes one draw.
    pub fn sample_dominance(&self, random: &mut Randomizer) -> f64 {
        random.next_float().powf(self.id().dominance())
    }

    /// Read the fields of a layer whose id has already been consumed.
    pub fn decode_as(id: LayerId, buffer: &mut BinBuffer) -> Result<Layer, CodecError> {
        Ok(match id {
            LayerId::Base => Layer::Base(LayerBase::decode(buffer)?),
            LayerId::Spots => Layer::Spots(LayerSpots::decode(buffer)?),
            LayerId::Stripes => Layer::Stripes(LayerStripes::decode(buffer)?),
            LayerId::Ridge => Layer::Ridge(LayerRidge::decode(buffer)?),
            LayerId::Web => Layer::Web(LayerWeb::decode(buffer)?),
            LayerId::ShapeBody => Layer::ShapeBody(LayerShapeBody::decode(buffer)?),
            LayerId::ShapeFin => Layer::ShapeFin(LayerShapeFin::decode(buffer)?),
        })
    }
}

/// Writes the variant fields only; the id byte belongs to whoever frames the layer.
impl Encode for Layer {
    fn encode(&self, buffer: &mut BinBuffer) {
        match self {
            Layer::Base(layer) => layer.encode(buffer),
            Layer::Spots(layer) => layer.encode(buffer),
            Layer::Stripes(layer) => layer.encode(buffer),
            Layer::Ridge(layer) => layer.encode(buffer),
            Layer::Web(layer) => layer.encode(buffer),
            Layer::ShapeBody(layer) => layer.encode(buffer),
            Layer::ShapeFin(layer) => layer.encode(buffer),
        }
    }
}
