use crate::export::{ExportFormat, ExportReport};
use clap::{Parser, Subcommand};

/// Command-line interface definition for labtrack
/// CLI application to plan sampling trips and follow samples through the lab
#[derive(Parser)]
#[command(
    name = "labtrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan sampling and inspection trips, track due dates and follow samples through the lab",
    long_about = None
)]
pub struct Cli {
    /// Override the state snapshot path (useful for tests or a custom file)
    #[arg(global = true, long = "data")]
    pub data: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the current date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and write the seed dataset
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show or change the sampling cycles (months per product type)
    Cycles {
        #[arg(
            long = "set",
            value_name = "TYPE=MONTHS",
            help = "Set a cycle, e.g. --set concrete=4 (repeatable)"
        )]
        set: Vec<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log")]
        print: bool,

        #[arg(long = "limit", help = "Only print the latest N rows")]
        limit: Option<usize>,
    },

    /// Company products due for sampling or inspection, ranked by priority
    Due {
        #[arg(long = "product-type", value_name = "TYPE", help = "concrete, cement, slag, fly_ash (repeatable)")]
        product_type: Vec<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long = "standard", value_name = "STANDARD")]
        standard: Option<String>,

        #[arg(long = "customer", value_name = "CODE", help = "Customer code (substring, case-insensitive)")]
        customer: Option<String>,

        #[arg(long, help = "Sampling priority: ok, approaching, overdue")]
        priority: Option<String>,
    },

    /// Summary counters and the top prioritized company products
    Dashboard,

    /// List employees with their skills and field status
    Employees,

    /// Manage company products
    Cp {
        #[command(subcommand)]
        action: CpCommand,
    },

    /// Plan, run and complete trips
    Trip {
        #[command(subcommand)]
        action: TripCommand,
    },

    /// Lab intake: shipping, result entry and approval
    Lab {
        #[command(subcommand)]
        action: LabCommand,
    },

    /// Export expenses or the due list
    Export {
        #[arg(long, value_enum, default_value = "expenses")]
        report: ExportReport,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum CpCommand {
    /// List company products
    List {
        #[arg(long, help = "devam, kesikli, aski, iptal")]
        status: Option<String>,

        #[arg(long, help = "Include cancelled (iptal) products")]
        all: bool,
    },

    /// Register a product for a company
    Add {
        #[arg(long)]
        company: u32,

        #[arg(long)]
        product: u32,

        #[arg(long)]
        site: Option<u32>,

        #[arg(long = "code")]
        code: Option<String>,

        #[arg(long = "certificate")]
        certificate: Option<String>,

        #[arg(long = "certificate-date")]
        certificate_date: Option<String>,

        #[arg(long = "last-sample")]
        last_sample: Option<String>,

        #[arg(long = "last-inspection")]
        last_inspection: Option<String>,

        #[arg(long, help = "devam, kesikli, aski, iptal")]
        status: Option<String>,

        #[arg(long, help = "yapti, yapmadi, muaf")]
        payment: Option<String>,
    },

    /// Update fields of a company product
    Update {
        id: u32,

        #[arg(long)]
        site: Option<u32>,

        #[arg(long = "code")]
        code: Option<String>,

        #[arg(long = "certificate")]
        certificate: Option<String>,

        #[arg(long = "certificate-date")]
        certificate_date: Option<String>,

        #[arg(long = "last-sample")]
        last_sample: Option<String>,

        #[arg(long = "last-inspection")]
        last_inspection: Option<String>,

        #[arg(long, help = "yapti, yapmadi, muaf")]
        payment: Option<String>,
    },

    /// Change the certification status (iptal archives)
    Status { id: u32, status: String },
}

#[derive(Subcommand)]
pub enum TripCommand {
    /// List trips
    List {
        #[arg(long, help = "PLANNED, ACTIVE, COMPLETED, CANCELLED")]
        status: Option<String>,
    },

    /// Show a trip with its items and completion
    Show { id: u32 },

    /// Plan a new trip
    Create {
        #[arg(long)]
        name: Option<String>,

        #[arg(long = "cp", value_name = "IDS", help = "Company product ids, comma separated")]
        cp: String,

        #[arg(long = "assignees", value_name = "IDS", help = "Employee ids, comma separated")]
        assignees: String,

        #[arg(
            long = "duty",
            value_name = "CP=TYPE[:IDS]",
            help = "Duty per company product, e.g. 3=BOTH:1+2 (repeatable)"
        )]
        duty: Vec<String>,

        #[arg(long = "planned-at")]
        planned_at: Option<String>,

        #[arg(long, help = "PLANNED or ACTIVE (default)")]
        status: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long = "planned-by")]
        planned_by: Option<String>,

        #[arg(long, help = "COMPANY_VEHICLE, BUS, PLANE, TRAIN")]
        transport: Option<String>,

        #[arg(long)]
        plate: Option<String>,

        #[arg(long, help = "COMPANY or CPC")]
        lodging: Option<String>,
    },

    /// Change the status of a trip
    Status { id: u32, status: String },

    /// Edit name, planned date or notes
    Update {
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "planned-at")]
        planned_at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Mark trip items as sampled
    Sample {
        #[arg(long = "item", required = true, help = "Trip item id (repeatable)")]
        item: Vec<u32>,

        #[arg(long, help = "Sampling date (default: today)")]
        date: Option<String>,
    },

    /// Finalize a trip with duties performed and expenses
    Complete {
        id: u32,

        #[arg(long, value_name = "FILE", help = "YAML completion payload")]
        file: Option<String>,

        #[arg(long = "by", value_name = "IDS", help = "Employee ids, comma separated")]
        by: Option<String>,

        #[arg(long, help = "COMPANY_VEHICLE, BUS, PLANE, TRAIN")]
        transport: Option<String>,

        #[arg(long)]
        plate: Option<String>,

        #[arg(long)]
        km: Option<f64>,

        #[arg(long)]
        days: Option<u32>,

        #[arg(long, help = "COMPANY or CPC")]
        lodging: Option<String>,

        #[arg(
            long = "entry",
            value_name = "ITEM:KEY=VALUE,...",
            help = "Per item outcome, e.g. 4:performed=2024-05-02,inspected=2024-05-02,lunch=150 (repeatable)"
        )]
        entry: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum LabCommand {
    /// Sampled items not yet shipped to a lab
    Samples,

    /// Ship a sample to a lab
    Send {
        item: u32,

        #[arg(long)]
        lab: u32,

        #[arg(long = "production-date")]
        production_date: String,

        #[arg(long = "last-sale-date")]
        last_sale_date: String,

        #[arg(long)]
        storage: String,

        #[arg(long)]
        seal: String,

        #[arg(long = "foreign-matter", default_value = "")]
        foreign_matter: String,

        #[arg(long, default_value = "")]
        weight: String,
    },

    /// Samples at the lab with their expected return date
    Queue,

    /// Enter lab results and send them for confirmation
    Fill {
        item: u32,

        #[arg(long = "value", value_name = "KEY=VALUE", help = "Result field (repeatable)")]
        value: Vec<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long = "doc", value_name = "PATH", help = "Attach a document (repeatable)")]
        doc: Vec<String>,
    },

    /// Results waiting for confirmation
    Inbox,

    /// Approve submitted results
    Approve { item: u32 },

    /// Send results back to the lab with a note
    Revise {
        item: u32,

        #[arg(long)]
        note: String,
    },

    /// Show the lab form of a trip item
    Show {
        item: u32,

        #[arg(long, value_name = "DIR", help = "Write attached documents to DIR")]
        extract: Option<String>,
    },

    /// Result fields required by a standard
    Fields { standard: Option<String> },
}
