use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hd", about = concat!("hd v", env!("CARGO_PKG_VERSION"), " - helpdesk inventory and tickets"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different desk directory
    #[arg(short = 'C', long = "desk-dir", global = true)]
    pub desk_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new helpdesk in the current directory
    Init(InitArgs),
    /// Manage inventory items
    #[command(alias = "inv")]
    Inventory(InventoryCmd),
    /// Manage support tickets
    #[command(alias = "t")]
    Tickets(TicketsCmd),
    /// List or add departments
    Departments(DepartmentsCmd),
    /// Show inventory and ticket counts
    Stats,
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Desk name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Add a department (repeatable)
    #[arg(long = "department", value_name = "NAME")]
    pub departments: Vec<String>,
    /// Reinitialize even if helpdesk/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InventoryCmd {
    #[command(subcommand)]
    pub action: InventoryAction,
}

#[derive(Subcommand)]
pub enum InventoryAction {
    /// List inventory items
    #[command(alias = "ls")]
    List,
    /// Register a new item
    Add(ItemAddArgs),
    /// Change fields of an existing item
    Edit(ItemEditArgs),
    /// Delete an item
    Rm(ItemIdArg),
}

#[derive(Args)]
pub struct ItemAddArgs {
    /// Item name
    pub name: String,
    /// Serial number (must be unique)
    #[arg(long)]
    pub serial: String,
    /// hardware, software or periferico
    #[arg(long = "type", value_name = "TYPE")]
    pub item_type: Option<String>,
    /// activo, mantenimiento or desincorporado
    #[arg(long)]
    pub status: Option<String>,
    /// Quantity on hand (invalid or zero becomes 1)
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,
    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ItemEditArgs {
    /// Item ID
    pub id: u32,
    /// New name
    #[arg(long)]
    pub name: Option<String>,
    /// New serial number
    #[arg(long)]
    pub serial: Option<String>,
    /// New type
    #[arg(long = "type", value_name = "TYPE")]
    pub item_type: Option<String>,
    /// New status
    #[arg(long)]
    pub status: Option<String>,
    /// New quantity
    #[arg(long, allow_hyphen_values = true)]
    pub stock: Option<String>,
    /// New description (empty string clears it)
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ItemIdArg {
    /// Item ID
    pub id: u32,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TicketsCmd {
    #[command(subcommand)]
    pub action: TicketsAction,
}

#[derive(Subcommand)]
pub enum TicketsAction {
    /// List tickets, optionally filtered
    #[command(alias = "ls")]
    List(TicketListArgs),
    /// Open a new ticket
    Add(TicketAddArgs),
    /// Set a ticket's status (or advance it one step)
    Status(TicketStatusArgs),
    /// Delete a ticket
    Rm(TicketIdArg),
}

#[derive(Args)]
pub struct TicketListArgs {
    /// Case-insensitive text to find in title, description or department
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// abierto, en-progreso or resuelto
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TicketAddArgs {
    /// Ticket title
    pub title: String,
    /// Ticket description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Department name
    #[arg(long)]
    pub department: Option<String>,
    /// Initial status (default: abierto)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TicketStatusArgs {
    /// Ticket ID
    pub id: u32,
    /// New status (omit to advance one step)
    pub status: Option<String>,
}

#[derive(Args)]
pub struct TicketIdArg {
    /// Ticket ID
    pub id: u32,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Departments
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct DepartmentsCmd {
    #[command(subcommand)]
    pub action: Option<DepartmentsAction>,
}

#[derive(Subcommand)]
pub enum DepartmentsAction {
    /// List departments (default)
    List,
    /// Add a department
    Add(DepartmentNameArg),
    /// Remove a department
    Rm(DepartmentNameArg),
}

#[derive(Args)]
pub struct DepartmentNameArg {
    /// Department name
    pub name: String,
}
