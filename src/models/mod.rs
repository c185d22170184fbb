pub mod company;
pub mod company_product;
pub mod completion;
pub mod employee;
pub mod lab_form;
pub mod log_entry;
pub mod product_type;
pub mod trip;
pub mod trip_item;

pub use company::{Company, Lab, Product, Site};
pub use company_product::{CompanyProduct, CompanyProductStatus, PaymentStatus};
pub use completion::{CompleteTripInput, TripCompletion, TripCompletionEntry};
pub use employee::{Employee, EmployeeStatus};
pub use lab_form::{LabForm, LabFormDocument, LabFormStatus};
pub use log_entry::LogEntry;
pub use product_type::ProductType;
pub use trip::{DutyAssignment, DutyType, LodgingProvider, TransportMode, Trip, TripStatus};
pub use trip_item::{LabShipmentDetails, LabStatus, TripItem};
