//! Diesel schema for candidate persistence.

diesel::table! {
    /// Candidate records written by the intake process.
    candidates (id) {
        /// Store-assigned identifier.
        id -> Int8,
        /// Owning client identifier.
        client_id -> Text,
        /// Given name.
        first_name -> Nullable<Text>,
        /// Family name.
        last_name -> Nullable<Text>,
        /// Email address.
        email -> Nullable<Text>,
        /// Phone number.
        phone -> Nullable<Text>,
        /// Courier identifier.
        fedex_id -> Nullable<Text>,
        /// Application date as reported by the intake source.
        application_date -> Nullable<Text>,
        /// Resume score.
        rwp_score -> Nullable<Float8>,
        /// Resume classification.
        rwp_classification -> Nullable<Text>,
        /// Resume rationale shown to clients.
        rwp_rationale -> Nullable<Text>,
        /// Resume notes shown to recruiters.
        resume_notes -> Nullable<Text>,
        /// Stored resume file name.
        resume_filename -> Nullable<Text>,
        /// Background check status.
        background_status -> Nullable<Text>,
        /// Background check order identifier.
        background_id -> Nullable<Text>,
        /// Drug screen status.
        drug_test_status -> Nullable<Text>,
        /// Drug screen order identifier.
        drug_test_id -> Nullable<Text>,
        /// Profile completion status.
        profile_status -> Nullable<Text>,
        /// Legacy order status.
        legacy_order_status -> Nullable<Text>,
        /// Recruiting pipeline status.
        status -> Nullable<Text>,
        /// Recruiter notes.
        recruiter_notes -> Nullable<Text>,
        /// GCIC upload bit (0/1).
        gcic_uploaded -> Nullable<Int4>,
        /// GCIC upload timestamp.
        gcic_upload_date -> Nullable<Timestamptz>,
        /// MEC upload bit (0/1).
        mec_uploaded -> Nullable<Int4>,
        /// MEC upload timestamp.
        mec_upload_date -> Nullable<Timestamptz>,
        /// Vendor change flag (0/1).
        fadv_change_flag -> Nullable<Int4>,
        /// Vendor change description.
        fadv_change_details -> Nullable<Text>,
        /// Vendor change timestamp.
        fadv_last_updated -> Nullable<Timestamptz>,
        /// Intake timestamp.
        intake_date -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Nullable<Timestamptz>,
    }
}
