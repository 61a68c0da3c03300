//! Pure data types: bars, intents, fills, packed order IDs.

pub mod bar;
pub mod fill;
pub mod ids;
pub mod intent;

pub use bar::{BarArrays, BarDataError, BarView};
pub use fill::Fill;
pub use ids::{pack_order_id, unpack_order_id, IdError, UnpackedId};
pub use intent::{OrderIntent, OrderKind, Role, Side};
