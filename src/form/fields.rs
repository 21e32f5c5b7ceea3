use std::fmt;
use std::str::FromStr;

use crate::submission::{HireRequest, OTHER_SERVICE};

/// Inputs of the hire request form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Service,
    Message,
    OtherDetail,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::Phone,
        FormField::Email,
        FormField::Service,
        FormField::Message,
        FormField::OtherDetail,
    ];

    /// Wire name of the field
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Phone => "phone",
            FormField::Email => "email",
            FormField::Service => "service",
            FormField::Message => "message",
            FormField::OtherDetail => "otherDetail",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of the service select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    Plumbing,
    Electrical,
    CivilWorks,
    WeldingFabrication,
    Maintenance,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::CivilWorks,
        ServiceCategory::WeldingFabrication,
        ServiceCategory::Maintenance,
        ServiceCategory::Other,
    ];

    /// Option value as submitted by the form
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Electrical => "Electrical",
            ServiceCategory::CivilWorks => "Civil Works",
            ServiceCategory::WeldingFabrication => "Welding & Fabrication",
            ServiceCategory::Maintenance => "Maintenance",
            ServiceCategory::Other => OTHER_SERVICE,
        }
    }

    pub fn is_other(self) -> bool {
        self == ServiceCategory::Other
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service category: {0:?}")]
pub struct UnknownService(pub String);

impl FromStr for ServiceCategory {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

/// Raw values as read from the form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Selected option value, empty when nothing is selected
    pub service: String,
    pub message: String,
    pub other_detail: String,
}

impl FormValues {
    /// Trim every text input. The service value is taken as selected.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            service: self.service,
            message: self.message.trim().to_string(),
            other_detail: self.other_detail.trim().to_string(),
        }
    }

    pub fn is_other_service(&self) -> bool {
        self.service == OTHER_SERVICE
    }

    pub fn into_request(self) -> HireRequest {
        HireRequest {
            name: self.name,
            phone: self.phone,
            email: self.email,
            service: self.service,
            message: self.message,
            other_detail: self.other_detail,
        }
    }
}
