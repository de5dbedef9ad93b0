// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction pass
//!
//! Re-walks the same lines as [`crate::counter`] and writes attribute values
//! and face corners into buffers reserved up front from the structural
//! counts. A buffer never grows past its count; after the walk every buffer
//! must be exactly full.

use nom::{
    character::complete::{char, u32 as decimal},
    combinator::{all_consuming, opt},
    sequence::preceded,
    IResult,
};
use smallvec::SmallVec;

use crate::counter::{count_elements, CORNERS_PER_FACE};
use crate::error::{ElementKind, Error, Result};
use crate::scanner::{is_horizontal_whitespace, skip_horizontal_whitespace, tokens, LineKind, Lines};
use crate::types::{AttributeArrays, ElementCounts, IndexTriple, ParsedObject};

/// Parse exactly `N` whitespace-separated floats from a line body.
///
/// Each number must end at whitespace or at the end of the line. Anything
/// after the `N`th number is ignored (e.g. the optional `w` of `v x y z w`).
pub fn parse_floats<const N: usize>(body: &[u8], line: usize) -> Result<[f32; N]> {
    let mut out = [0.0f32; N];
    let mut pos = 0;

    for (found, slot) in out.iter_mut().enumerate() {
        pos = skip_horizontal_whitespace(body, pos);
        match fast_float::parse_partial::<f32, _>(&body[pos..]) {
            Ok((value, consumed))
                if consumed > 0
                    && body
                        .get(pos + consumed)
                        .map_or(true, |&b| is_horizontal_whitespace(b)) =>
            {
                *slot = value;
                pos += consumed;
            }
            _ => {
                return Err(Error::MalformedNumber {
                    line,
                    expected: N,
                    found,
                })
            }
        }
    }

    Ok(out)
}

/// Raw 1-based index group: `a`, `a/b`, `a//c`, `a/b/c`, `/b/c`, ...
fn index_group(input: &[u8]) -> IResult<&[u8], (Option<u32>, Option<u32>, Option<u32>)> {
    let (input, location) = opt(decimal)(input)?;
    let (input, uv) = opt(preceded(char('/'), opt(decimal)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(decimal)))(input)?;
    Ok((input, (location, uv.flatten(), normal.flatten())))
}

/// Parse one face corner token into a zero-based triple.
///
/// Omitted components, and the literal file index 0 which refers to no
/// element, become `None`.
pub fn parse_corner(token: &[u8], line: usize) -> Result<IndexTriple> {
    match all_consuming(index_group)(token) {
        Ok((_, (location, uv, normal))) => Ok(IndexTriple::from_file_indices(
            location.unwrap_or(0),
            uv.unwrap_or(0),
            normal.unwrap_or(0),
        )),
        Err(_) => Err(Error::malformed_index_group(line, token)),
    }
}

/// Parse the three corners of a face line body.
pub fn parse_face(body: &[u8], line: usize) -> Result<[IndexTriple; CORNERS_PER_FACE]> {
    let corners: SmallVec<[&[u8]; 4]> = tokens(body).collect();
    if corners.len() != CORNERS_PER_FACE {
        return Err(Error::NonTriangularFace {
            line,
            corners: corners.len(),
        });
    }

    Ok([
        parse_corner(corners[0], line)?,
        parse_corner(corners[1], line)?,
        parse_corner(corners[2], line)?,
    ])
}

#[inline]
fn check_room(kind: ElementKind, written: usize, adding: usize, expected: usize) -> Result<()> {
    if written + adding > expected {
        return Err(Error::InternalCountMismatch {
            kind,
            expected,
            actual: written + adding,
        });
    }
    Ok(())
}

#[inline]
fn check_full(kind: ElementKind, written: usize, expected: usize) -> Result<()> {
    if written != expected {
        return Err(Error::InternalCountMismatch {
            kind,
            expected,
            actual: written,
        });
    }
    Ok(())
}

/// Fill attribute arrays and face corners using the counts of the
/// structural pass.
pub fn extract_attributes(input: &[u8], counts: &ElementCounts) -> Result<ParsedObject> {
    let mut attributes = AttributeArrays::default();
    attributes.locations.try_reserve_exact(counts.locations)?;
    attributes.normals.try_reserve_exact(counts.normals)?;
    attributes.uvs.try_reserve_exact(counts.uvs)?;
    let mut corners: Vec<IndexTriple> = Vec::new();
    corners.try_reserve_exact(counts.face_corners)?;

    for line in Lines::new(input) {
        match line.kind {
            LineKind::Location => {
                let value = parse_floats::<3>(line.body, line.number)?;
                check_room(ElementKind::Location, attributes.locations.len(), 1, counts.locations)?;
                attributes.locations.push(value);
            }
            LineKind::Normal => {
                let value = parse_floats::<3>(line.body, line.number)?;
                check_room(ElementKind::Normal, attributes.normals.len(), 1, counts.normals)?;
                attributes.normals.push(value);
            }
            LineKind::TexCoord => {
                let value = parse_floats::<2>(line.body, line.number)?;
                check_room(ElementKind::TexCoord, attributes.uvs.len(), 1, counts.uvs)?;
                attributes.uvs.push(value);
            }
            LineKind::Face => {
                let face = parse_face(line.body, line.number)?;
                check_room(
                    ElementKind::FaceCorner,
                    corners.len(),
                    CORNERS_PER_FACE,
                    counts.face_corners,
                )?;
                corners.extend_from_slice(&face);
            }
            LineKind::Object | LineKind::Comment | LineKind::Blank | LineKind::Other => {}
        }
    }

    check_full(ElementKind::Location, attributes.locations.len(), counts.locations)?;
    check_full(ElementKind::Normal, attributes.normals.len(), counts.normals)?;
    check_full(ElementKind::TexCoord, attributes.uvs.len(), counts.uvs)?;
    check_full(ElementKind::FaceCorner, corners.len(), counts.face_corners)?;

    tracing::trace!(corners = corners.len(), "extracted obj attributes");

    Ok(ParsedObject {
        counts: *counts,
        attributes,
        corners,
    })
}

/// Run both passes over `input`.
pub fn parse_object_data(input: &[u8]) -> Result<ParsedObject> {
    let counts = count_elements(input)?;
    extract_attributes(input, &counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_floats() {
        let [x, y, z] = parse_floats::<3>(b" 1.5 -2 3e2", 1).unwrap();
        assert_relative_eq!(x, 1.5);
        assert_relative_eq!(y, -2.0);
        assert_relative_eq!(z, 300.0);

        // Optional w component is ignored
        let [u, v] = parse_floats::<2>(b"\t0.25 0.75 0.0\r", 1).unwrap();
        assert_relative_eq!(u, 0.25);
        assert_relative_eq!(v, 0.75);
    }

    #[test]
    fn test_parse_floats_short_line() {
        match parse_floats::<3>(b" 1 2", 9) {
            Err(Error::MalformedNumber {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 9);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_floats_rejects_garbage() {
        assert!(parse_floats::<3>(b" 1 two 3", 1).is_err());
        assert!(parse_floats::<3>(b" 1 2x 3", 1).is_err());
        assert!(parse_floats::<2>(b"", 1).is_err());
    }

    #[test]
    fn test_parse_corner_forms() {
        assert_eq!(parse_corner(b"1/2/3", 1).unwrap(), IndexTriple::new(0, 1, 2));
        assert_eq!(
            parse_corner(b"5//2", 1).unwrap(),
            IndexTriple {
                location: Some(4),
                uv: None,
                normal: Some(1),
            }
        );
        assert_eq!(
            parse_corner(b"7", 1).unwrap(),
            IndexTriple {
                location: Some(6),
                uv: None,
                normal: None,
            }
        );
        assert_eq!(
            parse_corner(b"3/4", 1).unwrap(),
            IndexTriple {
                location: Some(2),
                uv: Some(3),
                normal: None,
            }
        );
        assert_eq!(
            parse_corner(b"/2/", 1).unwrap(),
            IndexTriple {
                location: None,
                uv: Some(1),
                normal: None,
            }
        );
        // File index 0 refers to nothing
        assert_eq!(parse_corner(b"0/0/0", 1).unwrap(), IndexTriple::default());
    }

    #[test]
    fn test_parse_corner_rejects_malformed() {
        for token in [&b"-1/2/3"[..], b"1/2/3/4", b"a/b/c", b"1.5", b"99999999999", b"1/+2"] {
            assert!(
                matches!(parse_corner(token, 4), Err(Error::MalformedIndexGroup { line: 4, .. })),
                "token {:?} should be rejected",
                String::from_utf8_lossy(token)
            );
        }
    }

    #[test]
    fn test_parse_face() {
        let face = parse_face(b" 1/1/1 2/2/2 3/3/3\r", 1).unwrap();
        assert_eq!(face[2], IndexTriple::new(2, 2, 2));
        assert!(matches!(
            parse_face(b" 1 2", 3),
            Err(Error::NonTriangularFace { line: 3, corners: 2 })
        ));
    }

    #[test]
    fn test_extract_fills_exact_buffers() {
        let input = b"o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1 3/1/1";
        let parsed = parse_object_data(input).unwrap();

        assert_eq!(parsed.attributes.locations.len(), 3);
        assert_eq!(parsed.attributes.locations.capacity(), 3);
        assert_eq!(parsed.attributes.normals, vec![[0.0, 0.0, 1.0]]);
        assert_eq!(parsed.attributes.uvs, vec![[0.0, 0.0]]);
        assert_eq!(parsed.corners.len(), 3);
        assert_eq!(parsed.triangle_count(), 1);
    }

    #[test]
    fn test_malformed_location_aborts() {
        let input = b"v 0 0 0\nv 1 oops 0\n";
        assert!(matches!(
            parse_object_data(input),
            Err(Error::MalformedNumber { line: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_counts_too_small_is_internal_error() {
        let input = b"v 0 0 0\nv 1 0 0\n";
        let counts = ElementCounts {
            locations: 1,
            ..ElementCounts::default()
        };
        assert!(matches!(
            extract_attributes(input, &counts),
            Err(Error::InternalCountMismatch {
                kind: ElementKind::Location,
                expected: 1,
                actual: 2,
            })
        ));
    }

    #[test]
    fn test_counts_too_large_is_internal_error() {
        let input = b"vn 0 0 1\n";
        let counts = ElementCounts {
            normals: 2,
            ..ElementCounts::default()
        };
        assert!(matches!(
            extract_attributes(input, &counts),
            Err(Error::InternalCountMismatch {
                kind: ElementKind::Normal,
                expected: 2,
                actual: 1,
            })
        ));
    }

    #[test]
    fn test_pass_parity_edge_cases() {
        let cases: [&[u8]; 5] = [
            // Final line without a terminator
            b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3",
            // Comment-only lines in between
            b"# only comments\n#\n  # indented\nv 0 0 0\nv 1 0 0\nv 0 1 0\n# f 9 9 9 9\nf 1 2 3\n",
            // Blank and whitespace-only lines
            b"\n\n   \nv 0 0 0\n\t\nv 1 0 0\nv 0 1 0\n\nf 1 2 3\n\n",
            // CRLF endings
            b"v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nvt 0 0\r\nvn 0 0 1\r\nf 1/1/1 2/1/1 3/1/1\r\n",
            // Unknown statements
            b"mtllib a.mtl\ng group\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl m\ns 1\nl 1 2\nf 1 2 3\n",
        ];

        for input in cases {
            let counts = count_elements(input).unwrap();
            let parsed = extract_attributes(input, &counts).unwrap();
            assert_eq!(parsed.attributes.locations.len(), counts.locations);
            assert_eq!(parsed.attributes.normals.len(), counts.normals);
            assert_eq!(parsed.attributes.uvs.len(), counts.uvs);
            assert_eq!(parsed.corners.len(), counts.face_corners);
            assert_eq!(counts.locations, 3);
            assert_eq!(counts.face_corners, 3);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Statement {
            Location,
            Normal,
            TexCoord,
            Face,
            Comment,
            Blank,
            Unknown,
        }

        fn statement() -> impl Strategy<Value = Statement> {
            prop_oneof![
                Just(Statement::Location),
                Just(Statement::Normal),
                Just(Statement::TexCoord),
                Just(Statement::Face),
                Just(Statement::Comment),
                Just(Statement::Blank),
                Just(Statement::Unknown),
            ]
        }

        fn render(statement: &Statement) -> &'static str {
            match statement {
                Statement::Location => "v 0.5 -1 2e1",
                Statement::Normal => "  vn 0 0 1",
                Statement::TexCoord => "vt\t0.25 1",
                Statement::Face => "f 1/1/1 2//2 3",
                Statement::Comment => "# v 1 2 3",
                Statement::Blank => "   ",
                Statement::Unknown => "usemtl stone",
            }
        }

        proptest! {
            #[test]
            fn passes_agree(
                statements in prop::collection::vec(statement(), 0..64),
                crlf in any::<bool>(),
                trailing_newline in any::<bool>(),
            ) {
                let newline = if crlf { "\r\n" } else { "\n" };
                let mut text = statements.iter().map(render).collect::<Vec<_>>().join(newline);
                if trailing_newline {
                    text.push_str(newline);
                }

                let counts = count_elements(text.as_bytes()).unwrap();
                let parsed = extract_attributes(text.as_bytes(), &counts).unwrap();

                let expect = |kind: fn(&Statement) -> bool| statements.iter().filter(|s| kind(s)).count();
                prop_assert_eq!(counts.locations, expect(|s| matches!(s, Statement::Location)));
                prop_assert_eq!(counts.normals, expect(|s| matches!(s, Statement::Normal)));
                prop_assert_eq!(counts.uvs, expect(|s| matches!(s, Statement::TexCoord)));
                prop_assert_eq!(counts.face_corners, 3 * expect(|s| matches!(s, Statement::Face)));
                prop_assert_eq!(parsed.attributes.locations.len(), counts.locations);
                prop_assert_eq!(parsed.attributes.normals.len(), counts.normals);
                prop_assert_eq!(parsed.attributes.uvs.len(), counts.uvs);
                prop_assert_eq!(parsed.corners.len(), counts.face_corners);
            }
        }
    }
}
