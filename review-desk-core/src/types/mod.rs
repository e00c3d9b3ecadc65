//! 类型定义模块

mod category;
mod notification;
mod record;
mod status;
mod summary;

pub use category::{RecordCategory, ReviewAction};
pub use notification::{Notification, NotificationLevel};
pub use record::{
    BookingDetails, ConsultantApplicationDetails, DocumentLink, FeatureSuggestionDetails,
    FeedbackDetails, OrderDetails, OrderItem, OtherDocuments, RecordDetails, ReviewRecord,
    SearchFields, StoredDocument, SupplierDeviceDetails, SupplierDocuments, UserDetails,
    OTHER_ROLE, SUPPLIER_ROLE,
};
pub use status::{Badge, Severity, StatusFilter};
pub use summary::{BookingStats, CategorySummary, DashboardSummary};
