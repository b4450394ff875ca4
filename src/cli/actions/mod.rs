pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        audience: String,
        login_path: String,
        logout_path: String,
        verifier_url: String,
        verifier_timeout: u64,
    },
}
