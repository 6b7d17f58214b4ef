/// Display version information
pub fn execute() {
    println!("single-voting {}", env!("CARGO_PKG_VERSION"));
    println!("Membership-gated voting strategy for a proposal router");
}
