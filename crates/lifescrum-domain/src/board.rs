use serde::{Deserialize, Serialize};

use crate::column::{ColumnId, ColumnName};

pub type BoardId = String;

pub const DEFAULT_BOARD_ID: &str = "main-board";

/// Named ordering of columns. Only the default board exists today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnId>,
}

pub fn default_board() -> Board {
    Board {
        id: DEFAULT_BOARD_ID.to_string(),
        name: "Main Board".to_string(),
        columns: ColumnName::ALL
            .iter()
            .map(|name| name.default_id().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_lists_all_columns() {
        let board = default_board();
        assert_eq!(board.id, "main-board");
        assert_eq!(board.columns.len(), 6);
        assert_eq!(board.columns.first().map(String::as_str), Some("icebox"));
        assert_eq!(board.columns.last().map(String::as_str), Some("done"));
    }
}
