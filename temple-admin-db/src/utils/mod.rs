use heapless::String as HeaplessString;
use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// The CBOR encoding is deterministic and the seed is fixed, so the same value
/// hashes identically across runs and processes. Used for submission
/// fingerprints.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Copies `value` into a fixed-capacity string, failing when it exceeds `N` bytes.
pub fn to_heapless<const N: usize>(value: &str) -> Result<HeaplessString<N>, String> {
    let mut out = HeaplessString::<N>::new();
    out.push_str(value)
        .map_err(|_| format!("Value is too long (max {N} bytes)"))?;
    Ok(out)
}
