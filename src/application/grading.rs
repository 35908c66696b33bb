pub mod grading_routine;
