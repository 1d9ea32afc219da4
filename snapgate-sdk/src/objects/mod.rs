pub mod notification;
pub mod payment;
pub mod snap;

pub use notification::{MidtransNotification, TransactionStatusResponse};
pub use payment::{
    CreatePaymentRequest, ErrorMessage, ErrorResponse, PaymentResponse, PaymentStatus,
    UnknownPaymentStatus,
};
pub use snap::{
    CustomerDetails, ItemDetail, SnapErrorResponse, SnapTransactionRequest,
    SnapTransactionResponse, TransactionDetails,
};
