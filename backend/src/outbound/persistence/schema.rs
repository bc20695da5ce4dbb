//! Diesel table definitions.
//!
//! Kept in sync by hand with `backend/migrations`.

diesel::table! {
    courses (id) {
        id -> Int8,
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    students (id) {
        id -> Int8,
        #[max_length = 255]
        name -> Varchar,
        birth_date -> Nullable<Date>,
    }
}

diesel::table! {
    course_students (course_id, student_id) {
        course_id -> Int8,
        student_id -> Int8,
    }
}

diesel::joinable!(course_students -> courses (course_id));
diesel::joinable!(course_students -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(courses, students, course_students);
