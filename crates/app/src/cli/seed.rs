use clap::Args;
use larder_app::{
    database::{self, Db},
    domain::{
        categories::{
            CategoriesService, CategoriesServiceError, PgCategoriesService,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            PgProductsService, ProductsService,
            data::NewProduct,
            records::{ProductOrigin, ProductUuid},
        },
        slugs::slugify,
    },
};

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

struct SampleProduct {
    name: &'static str,
    description: &'static str,
    origin: ProductOrigin,
    price: u64,
    stock: u32,
}

const fn sample(
    name: &'static str,
    description: &'static str,
    origin: ProductOrigin,
    price: u64,
    stock: u32,
) -> SampleProduct {
    SampleProduct {
        name,
        description,
        origin,
        price,
        stock,
    }
}

const CATALOG: &[(&str, &[SampleProduct])] = &[
    (
        "Fruits",
        &[
            sample("Golden Apples", "Crisp apples from the orchard, per kilo.", ProductOrigin::Local, 250, 120),
            sample("Organic Bananas", "Ripe organic bananas, per kilo.", ProductOrigin::Organic, 320, 80),
            sample("Lemons", "Unwaxed lemons, per kilo.", ProductOrigin::Imported, 410, 40),
        ],
    ),
    (
        "Vegetables",
        &[
            sample("Carrots", "Sweet carrots, per kilo.", ProductOrigin::Local, 180, 150),
            sample("Cherry Tomatoes", "Punnet of 250 g.", ProductOrigin::Conventional, 295, 60),
        ],
    ),
    (
        "Pantry",
        &[
            sample("Arabica Coffee", "Ground coffee, 250 g.", ProductOrigin::FairTrade, 590, 35),
            sample("Wildflower Honey", "Jar of 500 g.", ProductOrigin::Local, 870, 8),
        ],
    ),
];

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let categories = PgCategoriesService::new(db.clone());
    let products = PgProductsService::new(db);

    let mut created = 0_usize;

    for (category_name, samples) in CATALOG {
        let category = ensure_category(&categories, category_name).await?;

        let existing = categories
            .category_products(&category.slug)
            .await
            .map_err(|error| format!("failed to list {category_name}: {error}"))?;

        for sample in *samples {
            let slug = slugify(sample.name);

            if existing.iter().any(|product| product.slug == slug) {
                continue;
            }

            products
                .create_product(NewProduct {
                    uuid: ProductUuid::new(),
                    category: category.uuid,
                    name: sample.name.to_string(),
                    slug: Some(slug),
                    description: sample.description.to_string(),
                    origin: sample.origin,
                    price: sample.price,
                    stock: sample.stock,
                    is_available: true,
                })
                .await
                .map_err(|error| format!("failed to create {}: {error}", sample.name))?;

            created += 1;
        }
    }

    println!("seeded {created} products");

    Ok(())
}

async fn ensure_category(
    service: &PgCategoriesService,
    name: &str,
) -> Result<CategoryRecord, String> {
    match service.get_category(&slugify(name)).await {
        Ok(category) => Ok(category),
        Err(CategoriesServiceError::NotFound) => service
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
                slug: None,
            })
            .await
            .map_err(|error| format!("failed to create category {name}: {error}")),
        Err(error) => Err(format!("failed to look up category {name}: {error}")),
    }
}
