use super::super::attacks::KNIGHT_OFFSETS;
use super::super::{Board, Square};

impl Board {
    pub(crate) fn knight_candidates(&self, from: Square, out: &mut Vec<Square>) {
        out.extend(
            KNIGHT_OFFSETS
                .iter()
                .filter_map(|&(dr, dc)| from.offset(dr, dc)),
        );
    }
}
