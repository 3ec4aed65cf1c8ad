use crate::record::Record;

/// Rows accepted by [`Builder::insert`](super::Builder::insert).
///
/// A single [`Record`] is one row; vectors and arrays of anything that
/// converts into a [`Record`] are many.
pub trait IntoRows {
    fn into_rows(self) -> Vec<Record>;
}

impl IntoRows for Record {
    fn into_rows(self) -> Vec<Record> {
        vec![self]
    }
}

impl<R: Into<Record>> IntoRows for Vec<R> {
    fn into_rows(self) -> Vec<Record> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<R: Into<Record>, const N: usize> IntoRows for [R; N] {
    fn into_rows(self) -> Vec<Record> {
        self.into_iter().map(Into::into).collect()
    }
}
