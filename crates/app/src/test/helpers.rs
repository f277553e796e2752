//! Test Helpers

use crate::{
    auth::{JwtSettings, Password, Registration},
    domain::{
        categories::{data::NewCategory, records::CategoryUuid},
        products::{
            data::NewProduct,
            records::{ProductOrigin, ProductUuid},
        },
    },
};

/// Password every fixture account signs in with.
pub(crate) const TEST_PASSWORD: &str = "correct horse";

pub(crate) fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "larder-test-signing-secret".to_string(),
        access_ttl_seconds: 300,
        refresh_ttl_seconds: 3_600,
    }
}

/// Registration for `{name}@example.com`.
pub(crate) fn registration(name: &str) -> Registration {
    Registration {
        email: format!("{name}@example.com"),
        username: name.to_string(),
        password: Password::new(TEST_PASSWORD),
        first_name: String::new(),
        last_name: String::new(),
        phone: String::new(),
    }
}

pub(crate) fn new_category(name: &str) -> NewCategory {
    NewCategory {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        slug: None,
    }
}

/// An available, local product with a derived slug.
pub(crate) fn new_product(
    category: CategoryUuid,
    name: &str,
    price: u64,
    stock: u32,
) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        category,
        name: name.to_string(),
        slug: None,
        description: String::new(),
        origin: ProductOrigin::Local,
        price,
        stock,
        is_available: true,
    }
}
