//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{game::Outcome, rules::GameRules};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Parse a cell character.
    ///
    /// Digits `1`-`9` are accepted as empty cells so that the numbered
    /// rendering produced by [`Board::render_numbered`] parses back.
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '-' | '1'..='9' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Numeric code used in fixed-size observation vectors
    pub fn to_code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. `X` is the first player, `O` the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// The 3x3 grid.
///
/// Unlike a full game state this carries no turn marker; whoever owns the
/// board (an environment, a search) tracks whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Board { cells }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored, so both `"XO......."` and the three-line
    /// numbered rendering are accepted.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 cells are present, or if any character
    /// is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of marks the player has on the board
    pub fn count(&self, player: Player) -> usize {
        let target = player.to_cell();
        self.cells.iter().filter(|&&c| c == target).count()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.count(Player::X) + self.count(Player::O)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Place a mark and return the new board.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidActionRange`] for positions above 8 and
    /// [`crate::Error::CellOccupied`] for taken cells. `self` is never
    /// modified.
    #[must_use = "place returns a new board; the original is unchanged"]
    pub fn place(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        if pos >= 9 {
            return Err(crate::Error::InvalidActionRange { action: pos });
        }

        if !self.is_empty(pos) {
            return Err(crate::Error::CellOccupied { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = player.to_cell();
        Ok(next)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        GameRules::has_won(self, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    pub fn outcome(&self) -> Outcome {
        GameRules::evaluate(self)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Player to move under X-first alternation, or `None` when the mark
    /// counts cannot arise from alternating play.
    pub fn next_player(&self) -> Option<Player> {
        let (x, o) = (self.count(Player::X), self.count(Player::O));
        if x == o {
            Some(Player::X)
        } else if x == o + 1 {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Compact nine-character encoding, e.g. `"X...O...."`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Fixed-size numeric encoding: 0 empty, 1 X, 2 O
    pub fn to_numeric(&self) -> [u8; 9] {
        self.cells.map(Cell::to_code)
    }

    /// Three-line rendering with empty cells shown as their 1-based
    /// position, the format external text actors are prompted with:
    ///
    /// ```
    /// use ttt_oracle::tictactoe::{Board, Player};
    ///
    /// let board = Board::new().place(4, Player::X).unwrap();
    /// assert_eq!(board.render_numbered(), "1 2 3\n4 X 6\n7 8 9");
    /// ```
    pub fn render_numbered(&self) -> String {
        self.cells
            .chunks(3)
            .enumerate()
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| match cell {
                        Cell::Empty => (row * 3 + col + 1).to_string(),
                        other => other.to_char().to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for i in 0..9 {
            assert_eq!(board.get(i), Cell::Empty);
        }
        assert_eq!(board.next_player(), Some(Player::X));
    }

    #[test]
    fn test_place() {
        let board = Board::new();

        let next = board.place(4, Player::X).unwrap();
        assert_eq!(next.get(4), Cell::X);
        assert_eq!(board.get(4), Cell::Empty);

        let err = next.place(4, Player::O).unwrap_err();
        assert!(err.to_string().contains("occupied"));

        let err = next.place(9, Player::O).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidActionRange { action: 9 }));
    }

    #[test]
    fn test_empty_positions() {
        let board = Board::new();
        assert_eq!(board.empty_positions().len(), 9);

        let board = board.place(4, Player::X).unwrap();
        let empty = board.empty_positions();
        assert_eq!(empty.len(), 8);
        assert!(!empty.contains(&4));
        assert!(empty.contains(&0));
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.get(0), Cell::X);
        assert_eq!(board.get(1), Cell::O);
        assert_eq!(board.get(2), Cell::X);
        assert_eq!(board.next_player(), Some(Player::O));

        assert!(Board::from_string("XO").is_err());
        assert!(Board::from_string("XOZ......").is_err());
    }

    #[test]
    fn test_from_string_rejects_extra_cells() {
        let err = Board::from_string("X........O").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidBoardLength {
                expected: 9,
                got: 10,
                ..
            }
        ));
        assert!(err.to_string().contains("wrong length"));
    }

    #[test]
    fn test_numbered_rendering_parses_back() {
        let board = Board::from_string("X...O...X").unwrap();
        let rendered = board.render_numbered();
        assert_eq!(rendered, "X 2 3\n4 O 6\n7 8 X");
        assert_eq!(Board::from_string(&rendered).unwrap(), board);
    }

    #[test]
    fn test_numeric_encoding() {
        let board = Board::from_string("XO.......").unwrap();
        assert_eq!(board.to_numeric(), [1, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_next_player_rejects_impossible_counts() {
        let board = Board::from_string("XX.......").unwrap();
        assert_eq!(board.next_player(), None);
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert!(display.contains("XOX"));
        assert!(display.contains(".O."));
        assert!(display.contains("X.."));
    }
}
