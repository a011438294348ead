//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them
//! for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// User accounts. `email` carries a unique constraint.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        hashed_password -> Varchar,
        phone -> Nullable<Varchar>,
        role -> Varchar,
    }
}

diesel::table! {
    /// Fleets grouping matatus under one operator.
    fleets (id) {
        id -> Int4,
        name -> Varchar,
        operator_id -> Varchar,
    }
}

diesel::table! {
    /// Registered vehicles. `registration_number` carries a unique
    /// constraint; `fleet_id` is a weak reference that may be null.
    matatus (id) {
        id -> Int4,
        registration_number -> Varchar,
        fleet_id -> Nullable<Int4>,
        pochi_number -> Nullable<Varchar>,
        paybill_number -> Nullable<Varchar>,
        till_number -> Nullable<Varchar>,
        account_number -> Nullable<Varchar>,
        send_money_phone -> Nullable<Varchar>,
        mpesa_option -> Nullable<Varchar>,
        route_start -> Nullable<Varchar>,
        route_end -> Nullable<Varchar>,
        vehicle_tag -> Nullable<Varchar>,
        operator_id -> Varchar,
    }
}

diesel::table! {
    /// Fare schedules, several may reference one matatu.
    fares (id) {
        id -> Int4,
        matatu_id -> Int4,
        peak_fare -> Float8,
        non_peak_fare -> Float8,
        rainy_peak_fare -> Float8,
        rainy_non_peak_fare -> Float8,
        disability_discount -> Float8,
    }
}

diesel::table! {
    /// Recorded payment events.
    payments (id) {
        id -> Int4,
        user_id -> Int4,
        matatu_id -> Int4,
        amount -> Float8,
        route -> Nullable<Varchar>,
        timestamp -> Timestamptz,
        status -> Varchar,
        start_location -> Nullable<Varchar>,
        end_location -> Nullable<Varchar>,
        mpesa_receipt_number -> Nullable<Varchar>,
        payment_method -> Nullable<Varchar>,
        phone_number -> Nullable<Varchar>,
        fleet_id -> Nullable<Int4>,
    }
}

diesel::joinable!(matatus -> fleets (fleet_id));
diesel::joinable!(fares -> matatus (matatu_id));

diesel::allow_tables_to_appear_in_same_query!(users, fleets, matatus, fares, payments);
