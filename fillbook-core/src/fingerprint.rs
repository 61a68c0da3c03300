//! Fill-sequence fingerprinting.
//!
//! BLAKE3 over a canonical JSON rendering of the fills. Two runs are
//! bit-identical exactly when their fingerprints match, which is how the
//! parity suite asserts the kernels agree without diffing full sequences.

use crate::domain::Fill;
use serde_json::json;

/// Stable, platform-independent hash of a fill sequence.
pub fn fill_fingerprint(fills: &[Fill]) -> String {
    // Canonical rendering: fixed field order, bit pattern of each price so
    // two floats hash equal only when they are byte-identical.
    let canonical: Vec<serde_json::Value> = fills
        .iter()
        .map(|f| {
            json!({
                "bar_index": f.bar_index,
                "role": f.role.code(),
                "kind": f.kind.code(),
                "side": f.side.code(),
                "price_bits": f.price.to_bits(),
                "qty": f.qty,
                "order_id": f.order_id,
            })
        })
        .collect();
    blake3::hash(serde_json::Value::Array(canonical).to_string().as_bytes())
        .to_hex()
        .to_string()
}
