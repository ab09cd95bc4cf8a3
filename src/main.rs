fn main() {
    std::process::exit(clinicdesk_lib::run());
}
