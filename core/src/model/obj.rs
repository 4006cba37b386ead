//! Line-oriented text model format.
//!
//! Records, one per line, selected by a whitespace-delimited prefix:
//!
//! - `v x y z` — vertex position
//! - `vn x y z` — vertex normal
//! - `f a/b/c a/b/c a/b/c` or `f i j k` — triangle face with 1-based
//!   indices; the middle slash component (texture coordinate) is parsed
//!   and discarded
//!
//! Unrecognized prefixes are skipped. There is no comment syntax and no
//! material handling.

use crate::mesh::Mesh;

/// One parsed face-corner descriptor, indices already 0-based.
struct Corner {
    position: u32,
    /// Present for `a/b/c` descriptors, absent for bare indices.
    normal: Option<u32>,
}

/// Parse a whole text model source into a mesh.
///
/// Parsing is lenient: a `v`/`vn` record with fewer than three numbers is
/// skipped, and a face descriptor that is malformed or refers past the
/// data parsed so far stops the remainder of its own line only.
pub(super) fn parse(source: &str) -> Mesh {
    let mut mesh = Mesh::new();

    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                if let Some(coords) = read_triple(&mut tokens) {
                    mesh.vertices.extend(coords);
                }
            }
            Some("vn") => {
                if let Some(coords) = read_triple(&mut tokens) {
                    mesh.normals.extend(coords);
                }
            }
            Some("f") => read_face(&mut mesh, tokens),
            _ => {}
        }
    }

    mesh
}

/// Read exactly three floats from `tokens`; `None` if fewer parse.
fn read_triple<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<[f32; 3]> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some([x, y, z])
}

/// Append one face record's corners to the mesh index streams.
fn read_face<'a>(mesh: &mut Mesh, tokens: impl Iterator<Item = &'a str>) {
    for token in tokens {
        let Some(corner) = parse_corner(token) else {
            log::debug!("stopping face record at malformed descriptor {token:?}");
            break;
        };

        if corner.position as usize >= mesh.vertex_count() {
            log::debug!(
                "stopping face record at out-of-range vertex index {}",
                corner.position + 1
            );
            break;
        }
        if let Some(normal) = corner.normal {
            if normal as usize >= mesh.normal_count() {
                log::debug!(
                    "stopping face record at out-of-range normal index {}",
                    normal + 1
                );
                break;
            }
        }

        mesh.vertex_indices.push(corner.position);
        if let Some(normal) = corner.normal {
            mesh.normal_indices.push(normal);
        }
    }
}

/// Parse one face-corner token: a bare 1-based index, or a `v/vt/vn`
/// triple of 1-based indices.
fn parse_corner(token: &str) -> Option<Corner> {
    if let Ok(index) = token.parse::<u32>() {
        return Some(Corner {
            position: index.checked_sub(1)?,
            normal: None,
        });
    }

    let mut parts = token.split('/');
    let v: u32 = parts.next()?.parse().ok()?;
    let _vt: u32 = parts.next()?.parse().ok()?;
    let vn: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Corner {
        position: v.checked_sub(1)?,
        normal: Some(vn.checked_sub(1)?),
    })
}
