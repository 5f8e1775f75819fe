//! Golden test vectors for deterministic verification.
//!
//! Every renderer of these avatars must derive the same two colors from the
//! same key. Colors are lowercase CSS literals.

use feedloom_core::{Avatar, CoreError};

/// A golden avatar vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// The author key.
    pub key: &'static str,
    /// Expected fill color (key characters 0..6).
    pub fill: &'static str,
    /// Expected band color (key characters 6..12).
    pub band: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimum length key",
            key: "aaa111bbb222",
            fill: "#aaa111",
            band: "#bbb222",
        },
        GoldenVector {
            name: "second scenario author",
            key: "ccc333ddd444",
            fill: "#ccc333",
            band: "#ddd444",
        },
        GoldenVector {
            name: "uppercase key",
            key: "ABCDEF012345",
            fill: "#abcdef",
            band: "#012345",
        },
        GoldenVector {
            name: "full ed25519 key, only the first twelve characters count",
            key: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            fill: "#d75a98",
            band: "#0182b1",
        },
        GoldenVector {
            name: "black and white",
            key: "000000ffffff",
            fill: "#000000",
            band: "#ffffff",
        },
    ]
}

/// Derive the avatar for a vector.
pub fn avatar_from_vector(vector: &GoldenVector) -> Result<Avatar, CoreError> {
    Avatar::from_key(vector.key)
}

/// Check every vector. Returns `(name, matches, derived fill, derived band)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String, String)> {
    all_vectors()
        .iter()
        .map(|v| match avatar_from_vector(v) {
            Ok(avatar) => {
                let fill = avatar.fill.to_css();
                let band = avatar.band.to_css();
                let matches = fill == v.fill && band == v.band;
                (v.name.to_string(), matches, fill, band)
            }
            Err(e) => (v.name.to_string(), false, e.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, fill, band) in verify_all_vectors() {
            assert!(matches, "vector '{name}' derived {fill} / {band}");
        }
    }

    #[test]
    fn test_vectors_embed_in_markup() {
        for vector in all_vectors() {
            let html = avatar_from_vector(&vector).unwrap().to_html();
            assert!(
                html.contains(&format!("background:{};", vector.fill)),
                "vector '{}'",
                vector.name
            );
            assert!(html.contains(&format!("background:{}\"", vector.band)));
        }
    }

    #[test]
    fn test_case_does_not_change_colors() {
        let lower = Avatar::from_key("abcdef012345").unwrap();
        let upper = Avatar::from_key("ABCDEF012345").unwrap();
        assert_eq!(lower, upper);
    }
}
