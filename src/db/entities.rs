#[allow(unused_imports)]
pub mod prelude {
    pub use super::booking::Entity as Booking;
    pub use super::flight::Entity as Flight;
}

pub mod flight {
    use sea_orm::entity::prelude::*;

    #[sea_orm::model]
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "flights")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        #[sea_orm(unique)]
        pub flight_no: String,
        pub origin: String,
        pub destination: String,
        pub departure: String,
        pub seats: i32,
        pub price: f64,
        pub duration: String,
        pub aircraft: String,
        #[sea_orm(has_many)]
        pub bookings: HasMany<super::booking::Entity>,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod booking {
    use sea_orm::entity::prelude::*;

    #[sea_orm::model]
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "bookings")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub passenger_name: String,
        pub email: String,
        pub phone: String,
        pub seats_booked: i32,
        pub total_amount: f64,
        pub status: String,
        pub booking_date: Date,
        #[sea_orm(indexed)]
        pub flight_id: Uuid,
        #[sea_orm(belongs_to, from = "flight_id", to = "id", on_delete = "Cascade")]
        pub flight: HasOne<super::flight::Entity>,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
