//! Fixed seed dataset written by `init`.

use super::AppState;
use crate::core::trip::recalc_employee_statuses;
use crate::models::{
    Company, CompanyProduct, DutyType, Employee, EmployeeStatus, Lab, PaymentStatus, Product,
    ProductType, Site, TripItem,
};

fn company(id: u32, name: &str, customer_code: &str) -> Company {
    Company {
        id,
        name: name.into(),
        customer_code: Some(customer_code.into()),
    }
}

fn site(id: u32, company_id: u32, city: &str, district: &str, address: &str, code: &str) -> Site {
    Site {
        id,
        company_id,
        city: city.into(),
        district: Some(district.into()),
        address: Some(address.into()),
        site_code: Some(code.into()),
    }
}

fn product(id: u32, name: &str, group: &str, product_type: ProductType, standard: &str) -> Product {
    Product {
        id,
        name: name.into(),
        group_name: Some(group.into()),
        product_type,
        standard_no: Some(standard.into()),
    }
}

#[allow(clippy::too_many_arguments)]
fn company_product(
    id: u32,
    company_id: u32,
    site_id: Option<u32>,
    product_id: u32,
    code: &str,
    certificate: (&str, &str),
    last_sample: &str,
    last_inspection: &str,
    payment: PaymentStatus,
) -> CompanyProduct {
    CompanyProduct {
        site_id,
        product_code: Some(code.into()),
        certificate_no: Some(certificate.0.into()),
        certificate_date: Some(certificate.1.into()),
        last_sample_date: Some(last_sample.into()),
        last_inspection_date: Some(last_inspection.into()),
        payment_status: Some(payment),
        ..CompanyProduct::new(id, company_id, product_id)
    }
}

fn employee(id: u32, name: &str, city: &str, skills: &[ProductType]) -> Employee {
    Employee {
        id,
        name: name.into(),
        city: Some(city.into()),
        status: EmployeeStatus::Available,
        skills: skills.to_vec(),
    }
}

fn trip_item(id: u32, trip_id: u32, cp_id: u32, duty: DutyType, assignees: &[u32]) -> TripItem {
    TripItem {
        duty_assignee_ids: assignees.to_vec(),
        ..TripItem::new(id, trip_id, cp_id, duty)
    }
}

pub fn seed() -> AppState {
    use PaymentStatus::*;
    use ProductType::*;

    let mut state = AppState {
        companies: vec![
            company(1, "Anadolu Hazır Beton", "BT-001"),
            company(2, "Marmara Çimento", "-"),
            company(3, "Ege Yapı Kimya", "BT-448"),
            company(4, "Karadeniz Endüstri", "BT-102"),
            company(5, "Toros Madencilik", "-"),
        ],
        sites: vec![
            site(1, 1, "İstanbul", "Pendik", "Sanayi Cd. No:12", "ST-145"),
            site(2, 2, "Kocaeli", "Gebze", "İMES OSB 2. Cadde", "ST-198"),
            site(3, 3, "Bursa", "Nilüfer", "Organize Sanayi Bölgesi", "ST-255"),
            site(4, 4, "İzmir", "Aliağa", "Liman Yolu 45", "ST-312"),
            site(5, 5, "Trabzon", "Akçaabat", "Sanayi Sitesi", "ST-401"),
        ],
        products: vec![
            product(1, "Beton", "Beton", Concrete, "TS EN 13515"),
            product(2, "Beton", "Beton", Concrete, "TS EN 13515"),
            product(3, "CEM II/A-M (P-LL) 42,5 N", "Çimento", Cement, "TS EN 197-1"),
            product(4, "CEM II/B-M (P-LL) 32,5 R", "Çimento", Cement, "TS EN 197-1"),
            product(5, "CEM II/B-S 42,5N", "Cüruf", Slag, "TS EN 15167"),
            product(6, "Uçucu Kül - Kategori B", "Uçucu Kül", FlyAsh, "TS EN 450"),
        ],
        company_products: vec![
            company_product(1, 1, Some(1), 1, "CPC-1040.Ç1", ("CPC-1980", "2023-11-10"), "2025-07-12", "2025-04-15", Yapti),
            company_product(2, 1, Some(2), 2, "CPC-1040.Ç2", ("CPC-1970", "2024-02-22"), "2025-05-03", "2025-01-05", Yapmadi),
            company_product(3, 2, Some(3), 3, "CPC-2230.Ç4", ("CPC-2020", "2023-09-18"), "2025-03-14", "2025-02-10", Yapti),
            company_product(4, 2, Some(3), 4, "CPC-2230.Ç6", ("CPC-2100", "2024-04-01"), "2025-01-25", "2024-12-20", Muaf),
            company_product(5, 3, Some(4), 5, "CPC-2000.Ç1", ("CPC-1870", "2024-05-30"), "2024-12-19", "2024-08-11", Yapti),
            company_product(6, 4, Some(5), 1, "CPC-5310.Ç3", ("CPC-1850", "2023-06-11"), "2025-11-01", "2025-01-30", Yapmadi),
            company_product(7, 5, None, 6, "CPC-1540.U2", ("CPC-1820", "2024-10-03"), "2025-02-07", "2024-09-18", Muaf),
            company_product(8, 3, Some(4), 2, "CPC-2230.Ç2", ("CPC-2000", "2025-01-19"), "2025-07-29", "2025-02-01", Yapti),
        ],
        labs: vec![
            Lab { id: 1, name: "İstanbul Merkez Lab.".into() },
            Lab { id: 2, name: "Gebze Numune Lab.".into() },
            Lab { id: 3, name: "Bursa Çimento Lab.".into() },
            Lab { id: 4, name: "Ege Malzeme Lab.".into() },
            Lab { id: 5, name: "Trabzon Analiz Merkezi".into() },
            Lab { id: 6, name: "Çukurova Enerji Lab.".into() },
        ],
        employees: vec![
            employee(1, "Ayşe Yıldız", "İstanbul", &[Concrete, Cement]),
            employee(2, "Mert Demir", "Kocaeli", &[Concrete]),
            employee(3, "Selin Çelik", "İzmir", &[Cement, Slag]),
            employee(4, "Emir Kaya", "Ankara", &[Concrete, FlyAsh]),
            employee(5, "Zeynep Korkmaz", "Bursa", &[Cement]),
            employee(6, "Onur Arslan", "Trabzon", &[Concrete, Slag]),
        ],
        trips: Vec::new(),
        trip_items: vec![
            trip_item(1, 1, 1, DutyType::Sample, &[1, 4]),
            trip_item(2, 1, 2, DutyType::Inspection, &[4]),
            trip_item(3, 1, 3, DutyType::Sample, &[1]),
            trip_item(4, 2, 5, DutyType::Both, &[3]),
            trip_item(5, 2, 7, DutyType::Sample, &[3]),
        ],
        lab_forms: Vec::new(),
        trip_completions: Vec::new(),
        log: Vec::new(),
    };

    // No seed trips: every employee starts available.
    recalc_employee_statuses(&mut state.employees, &state.trips);
    state
}
