pub(crate) mod timetable;
