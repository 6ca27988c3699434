pub mod contact_list_service;
pub mod contact_service;
pub mod message_service;
pub mod thread_service;
