use std::fmt;

/// A national park, monument or historic site as listed on nps.gov.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalSite {
    /// e.g. "National Park"; may be empty.
    pub category: String,
    pub name: String,
    /// "City, ST", or `"Missing address"` when the page has none.
    pub address: String,
    /// Empty when the page has no postal code.
    pub zipcode: String,
    pub phone: String,
}

impl NationalSite {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        zipcode: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        NationalSite {
            category: category.into(),
            name: name.into(),
            address: address.into(),
            zipcode: zipcode.into(),
            phone: phone.into(),
        }
    }
}

impl fmt::Display for NationalSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {} {}", self.name, self.category, self.address, self.zipcode)
    }
}
