//! Outcome evaluation and move enumeration

use super::{Board, Cell, Outcome, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Pure rule functions over a board snapshot
pub struct GameRules;

impl GameRules {
    /// Classify the board: a completed line wins, a full board without one
    /// is a draw, anything else is still in progress.
    pub fn evaluate(board: &Board) -> Outcome {
        let cells = board.cells();
        for line in &WINNING_LINES {
            let first = cells[line[0]];
            if let Some(player) = first.to_player()
                && line.iter().all(|&idx| cells[idx] == first)
            {
                return Outcome::Win(player);
            }
        }

        if board.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// All empty positions
    pub fn available_moves(board: &Board) -> Vec<usize> {
        board.empty_positions()
    }

    pub fn opposite(player: Player) -> Player {
        player.opponent()
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(board: &Board, player: Player) -> bool {
        let target = player.to_cell();
        let cells = board.cells();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find all positions that would immediately win for the player, ascending
    pub fn winning_moves(board: &Board, player: Player) -> Vec<usize> {
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(board.cells(), player, line))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// The empty cell of a line holding two of the player's marks, if any
    fn winning_move_in_line(cells: &[Cell; 9], player: Player, line: &[usize; 3]) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty_pos } else { None }
    }
}
