pub mod loading;
pub mod question;
