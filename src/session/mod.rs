pub(crate) mod offline;
