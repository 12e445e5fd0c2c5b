use chrono::TimeDelta;

use kargoline::domain::TruckType;
use kargoline::domain::pricing::{
    COMMISSION_RATE, commission, estimate_price, final_fare, trip_duration_minutes,
};

use crate::helpers::{assert_money, start_time};

#[test]
fn given_cargo_van_and_twenty_miles_when_estimating_then_base_plus_mileage() {
    assert_money(estimate_price(TruckType::CargoVan, 20.0), 80.0);
}

#[test]
fn given_each_truck_type_when_estimating_zero_miles_then_base_fare() {
    assert_money(estimate_price(TruckType::Pickup, 0.0), 25.0);
    assert_money(estimate_price(TruckType::CargoVan, 0.0), 40.0);
    assert_money(estimate_price(TruckType::SmallBoxTruck, 0.0), 60.0);
}

#[test]
fn given_cargo_van_thirty_minute_trip_when_pricing_then_fare_is_92() {
    let fare = final_fare(TruckType::CargoVan, 20.0, 30.0);
    assert_money(fare, 92.0);
    assert_money(commission(fare), 18.4);
}

#[test]
fn given_box_truck_trip_when_pricing_then_all_components_apply() {
    // 60 + 2.75 * 10 + 0.60 * 45
    assert_money(final_fare(TruckType::SmallBoxTruck, 10.0, 45.0), 114.5);
}

#[test]
fn given_price_when_taking_commission_then_twenty_percent() {
    assert_money(COMMISSION_RATE, 0.20);
    assert_money(commission(50.0), 10.0);
}

#[test]
fn given_thirty_minutes_elapsed_when_measuring_trip_then_thirty() {
    let start = start_time();
    let end = start + TimeDelta::minutes(30);
    assert_money(trip_duration_minutes(start, end), 30.0);
}

#[test]
fn given_ten_seconds_elapsed_when_measuring_trip_then_one_minute_minimum() {
    let start = start_time();
    let end = start + TimeDelta::seconds(10);
    assert_money(trip_duration_minutes(start, end), 1.0);
}

#[test]
fn given_ninety_seconds_elapsed_when_measuring_trip_then_fractional_minutes() {
    let start = start_time();
    let end = start + TimeDelta::seconds(90);
    assert_money(trip_duration_minutes(start, end), 1.5);
}
