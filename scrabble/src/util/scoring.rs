//! Module for scoring a play.

use crate::{
    dawg::Dawg,
    error::{GameError, GameResult},
    game::board::Board,
    util::{
        bitboard::BitBoard,
        pos::{Direction, Pos},
        words::Word,
    },
};

/// Validates a word and finds its score.
pub fn score(word: Word, new: &BitBoard, board: &Board, dawg: &Dawg) -> GameResult<usize> {
    let perpendicular = word.dir().perpendicular();
    let mut score = 0;
    let mut word_multiplier = 1;
    let mut curr = dawg.root();

    for pos in word {
        let tile = board.at(pos).expect("an occupied square");
        let letter = tile.letter().expect("a letter");

        let next = curr.get_child(letter).ok_or(GameError::LexiconReject)?;
        curr = dawg.node(next);

        let (tile_m, word_m) = match new.is_set(pos) {
            true => pos.premium_multipliers(),
            false => (1, 1),
        };

        let cross_word_score = score_crossword(pos, perpendicular, board, dawg)?;

        word_multiplier *= word_m;
        score += tile_m * tile.score() + cross_word_score;
    }

    match curr.is_end_of_word() {
        true => Ok(word_multiplier * score),
        false => Err(GameError::LexiconReject),
    }
}

/// Finds the score for a word going in the provided direction,
/// at the provided position. Ensures that cross words formed are
/// valid.
fn score_crossword(pos: Pos, dir: Direction, board: &Board, dawg: &Dawg) -> GameResult<usize> {
    // check whether there is actually a crossword at this position.
    let has_tile_right = pos.dir(dir).and_then(|p| board.at(p)).is_some();
    let has_tile_left = pos.dir(dir.opposite()).and_then(|p| board.at(p)).is_some();
    if !has_tile_right && !has_tile_left {
        return Ok(0);
    }

    // First traverse to the beginning of the word.
    let opp = dir.opposite();
    let mut curr_pos = pos;
    while let Some((prev_pos, Some(_))) = curr_pos.dir(opp).map(|pos| (pos, board.at(pos))) {
        curr_pos = prev_pos;
    }

    let (tile_m, word_m) = pos.premium_multipliers();

    // Now traverse through the word to determine the score.
    let mut score = 0;
    let mut curr = dawg.root();
    loop {
        match curr_pos.dir(dir).map(|pos| (pos, board.at(pos))) {
            Some((next_pos, Some(tile))) => {
                let letter = tile.letter().expect("a letter");

                let next = curr.get_child(letter).ok_or(GameError::LexiconReject)?;
                curr = dawg.node(next);

                let t_multiplier = match curr_pos == pos {
                    true => tile_m,
                    false => 1,
                };

                score += tile.score() * t_multiplier;
                curr_pos = next_pos;
            }
            _ => return Ok(score * word_m),
        }
    }
}
