use async_graphql::{
    connection::{Connection, CursorType, Edge},
    OutputType,
};

use crate::{cursor::*, query::Page};

impl CursorType for TimestampCursor {
    type Error = CursorError;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        <Self as CursorKey>::decode_cursor(s)
    }

    fn encode_cursor(&self) -> String {
        <Self as CursorKey>::encode_cursor(self)
    }
}

impl CursorType for ScoreCursor {
    type Error = CursorError;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        <Self as CursorKey>::decode_cursor(s)
    }

    fn encode_cursor(&self) -> String {
        <Self as CursorKey>::encode_cursor(self)
    }
}

impl<T: OutputType> Page<T> {
    pub fn into_connection(self) -> Connection<String, T> {
        let mut connection = Connection::new(
            self.page_info.has_previous_page,
            self.page_info.has_next_page,
        );
        connection.edges.extend(
            self.items
                .into_iter()
                .map(|item| Edge::new(item.cursor, item.node)),
        );
        connection
    }
}
