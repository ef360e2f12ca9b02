#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
}
