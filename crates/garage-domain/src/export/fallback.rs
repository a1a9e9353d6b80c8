//! Sample records substituted when an export would otherwise be empty.
//!
//! The generator is seeded with a constant, so a given scope always yields
//! the same sample rows. Ids carry a `sample-` prefix so nobody mistakes
//! them for shop data.

use super::models::ExportData;
use crate::{Invoice, MaintenanceRecord, Vehicle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const FALLBACK_SEED: u64 = 0x6761_7261_6765;
pub const SAMPLE_SIZE: usize = 5;

const PROVINCES: &[&str] = &["京", "沪", "粤", "苏", "浙", "川"];
const BRANDS: &[(&str, &str)] = &[
    ("Toyota", "Camry"),
    ("Honda", "Accord"),
    ("Volkswagen", "Passat"),
    ("BYD", "Han"),
    ("Buick", "LaCrosse"),
    ("Nissan", "Sylphy"),
];
const COLORS: &[&str] = &["White", "Black", "Silver", "Blue", "Red"];
const OWNERS: &[&str] = &["张伟", "王芳", "李娜", "刘洋", "陈静", "赵磊"];
const SERVICES: &[(&str, &str)] = &[
    ("Oil Change", "Engine oil and filter replacement"),
    ("Brake Service", "Front brake pads replaced"),
    ("Tire Rotation", "Rotate and balance all tires"),
    ("Inspection", "Annual safety inspection"),
    ("Battery", "Battery test and replacement"),
];
const TECHNICIANS: &[&str] = &["Li Ming", "Zhou Qiang", "Wu Hao"];

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

fn sample_date(rng: &mut StdRng) -> (u32, String) {
    let day = rng.random_range(1..=20u32);
    (day, format!("2024-01-{:02}T09:00:00Z", day))
}

fn sample_plate(rng: &mut StdRng) -> String {
    let province = pick(rng, PROVINCES);
    let letter = char::from(b'A' + rng.random_range(0..8u8));
    let digits = rng.random_range(10000..100000u32);
    format!("{}{}{}", province, letter, digits)
}

/// Linked sample vehicles, work orders and invoices.
pub fn sample_data() -> ExportData {
    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED);
    let mut data = ExportData::default();

    for n in 1..=SAMPLE_SIZE {
        let (brand, model) = *pick(&mut rng, BRANDS);
        let owner = *pick(&mut rng, OWNERS);
        let (day, entry) = sample_date(&mut rng);
        let exit = format!("2024-01-{:02}T17:30:00Z", day + rng.random_range(0..5u32));

        let mut vehicle = Vehicle::new(format!("sample-v-{:03}", n), sample_plate(&mut rng));
        vehicle.brand = brand.to_string();
        vehicle.model = model.to_string();
        vehicle.color = pick(&mut rng, COLORS).to_string();
        vehicle.owner_name = owner.to_string();
        vehicle.owner_phone = format!("1{}", rng.random_range(3000000000u64..9000000000u64));
        vehicle.status = "completed".to_string();
        vehicle.entry_time = Some(entry.clone());
        vehicle.exit_time = Some(exit.clone());

        let (service, description) = *pick(&mut rng, SERVICES);
        let cost = f64::from(rng.random_range(20..200u32)) * 10.0;
        let mut record = MaintenanceRecord::new(format!("sample-m-{:03}", n), &vehicle.id);
        record.license_plate = vehicle.license_plate.clone();
        record.service_type = service.to_string();
        record.description = description.to_string();
        record.technician = pick(&mut rng, TECHNICIANS).to_string();
        record.cost = cost;
        record.status = "completed".to_string();
        record.start_date = Some(entry);
        record.completion_date = Some(exit.clone());

        let mut invoice = Invoice::new(format!("sample-i-{:03}", n), format!("INV-2024-{:04}", n))
            .with_amount(cost, (cost * 0.13).round());
        invoice.vehicle_id = vehicle.id.clone();
        invoice.license_plate = vehicle.license_plate.clone();
        invoice.customer_name = owner.to_string();
        invoice.status = "paid".to_string();
        invoice.issue_date = Some(exit);

        data.vehicles.push(vehicle);
        data.maintenance.push(record);
        data.invoices.push(invoice);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportScope;

    #[test]
    fn test_sample_data_is_deterministic() {
        let first = sample_data();
        let second = sample_data();

        assert_eq!(first.vehicles, second.vehicles);
        assert_eq!(first.maintenance, second.maintenance);
        assert_eq!(first.invoices, second.invoices);
    }

    #[test]
    fn test_sample_data_fills_every_scope() {
        let data = sample_data();
        for scope in [
            ExportScope::Vehicles,
            ExportScope::Maintenance,
            ExportScope::Invoices,
            ExportScope::All,
        ] {
            assert!(!data.is_empty_for(scope));
        }
        assert_eq!(data.vehicles.len(), SAMPLE_SIZE);
    }

    #[test]
    fn test_sample_records_are_linked() {
        let data = sample_data();
        for ((vehicle, record), invoice) in data
            .vehicles
            .iter()
            .zip(&data.maintenance)
            .zip(&data.invoices)
        {
            assert!(vehicle.id.starts_with("sample-"));
            assert_eq!(record.vehicle_id, vehicle.id);
            assert_eq!(invoice.license_plate, vehicle.license_plate);
            assert_eq!(invoice.total_amount, invoice.amount + invoice.tax);
        }
    }
}
