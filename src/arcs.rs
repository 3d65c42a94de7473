// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{Arc, Error, Position, TransformParams};

/// Absolute positions of one arc, produced lazily.
///
/// With a transform, each input position is a delta from the previous one:
/// deltas are summed then mapped through `scale * sum + translate`. Without a
/// transform the positions are yielded unchanged. Ordinates past the first two
/// are copied as they are.
///
/// The iterator borrows the arc; call [`decode_arc`] again to restart it.
#[derive(Clone, Debug)]
pub struct DecodedArc<'a> {
    points: std::slice::Iter<'a, Position>,
    transform: Option<&'a TransformParams>,
    x: f64,
    y: f64,
}

impl<'a> Iterator for DecodedArc<'a> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let pt = self.points.next()?;
        let tr = match self.transform {
            None => return Some(pt.clone()),
            Some(tr) => tr,
        };
        self.x += pt[0];
        self.y += pt[1];
        let mut new_pt = pt.clone();
        new_pt[0] = tr.scale[0] * self.x + tr.translate[0];
        new_pt[1] = tr.scale[1] * self.y + tr.translate[1];
        Some(new_pt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl<'a> ExactSizeIterator for DecodedArc<'a> {}

pub fn decode_arc<'a>(arc: &'a [Position], transform: Option<&'a TransformParams>) -> DecodedArc<'a> {
    DecodedArc {
        points: arc.iter(),
        transform,
        x: 0.,
        y: 0.,
    }
}

/// Apply a transform to a single quantized position (no delta decoding).
pub fn transform_point(pos: &[f64], transform: Option<&TransformParams>) -> Position {
    let mut new_pos = pos.to_vec();
    if let Some(tr) = transform {
        new_pos[0] = pos[0] * tr.scale[0] + tr.translate[0];
        new_pos[1] = pos[1] * tr.scale[1] + tr.translate[1];
    }
    new_pos
}

/// Index into the arc table selected by an arc reference.
///
/// "A negative arc index indicates that the arc at the ones’ complement of the index must be reversed
/// to reconstruct the geometry: -1 refers to the reversed first arc, -2 refers to the reversed second arc,
/// and so on."
///
/// [source: 2.1.4. Arc Indexes](https://github.com/topojson/topojson-specification#214-arc-indexes)
#[inline]
pub fn arc_index(arc_ref: i32) -> usize {
    if arc_ref < 0 {
        !arc_ref as usize
    } else {
        arc_ref as usize
    }
}

/// Concatenate the arcs selected by `refs` into one line or ring.
///
/// Consecutive arcs share an endpoint, so every arc after the first loses its
/// first position.
pub fn resolve_arcs(
    refs: &[i32],
    arcs: &[Arc],
    transform: Option<&TransformParams>,
) -> Result<Vec<Position>, Error> {
    if refs.is_empty() {
        return Err(Error::EmptyArcNode);
    }
    let mut line = Vec::new();
    for (i, &arc_ref) in refs.iter().enumerate() {
        let arc = arcs.get(arc_index(arc_ref)).ok_or(Error::ArcIndexOutOfBounds {
            index: arc_ref,
            len: arcs.len(),
        })?;
        let mut points: Vec<Position> = decode_arc(arc, transform).collect();
        if arc_ref < 0 {
            points.reverse();
        }
        let skip = if i > 0 { 1 } else { 0 };
        line.extend(points.into_iter().skip(skip));
    }
    Ok(line)
}
