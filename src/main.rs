use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use futures::StreamExt;
use serde::Serialize;

use catalog_view::cli::{Cli, Command};
use catalog_view::config::Config;
use catalog_view::logging::init_tracing;
use catalog_view::model::{Category, Product, Supplier};
use catalog_view::reactive::ErrorChannel;
use catalog_view::{DetailView, DetailViewModel, HttpBackend, ListViewModel, Sources};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    init_tracing(&config.logging.filter);
    tracing::info!(base_url = %config.api.base_url, "Catalog client starting");

    let backend = Arc::new(HttpBackend::new(&config.api)?);
    let sources = Sources::new(backend, &config.catalog);

    match cli.command {
        Command::List { category, add } => {
            let view = ListViewModel::new(&sources.products, &sources.categories);
            view.select_category(category);

            let mut products = view.products();
            let mut list = next_value(products.next().await, view.errors())?;
            if add > 0 {
                for _ in 0..add {
                    view.add_product();
                }
                list = next_value(products.next().await, view.errors())?;
            }

            if cli.json {
                print_json(&list)?;
            } else {
                println!("{}", view.page_title());
                print_products(&list);
            }
        }
        Command::Detail { id } => {
            sources.products.select_product(id);
            let view = DetailViewModel::new(&sources.products);
            let detail = next_value(view.view().next().await, view.errors())?;

            if cli.json {
                print_json(&detail)?;
            } else {
                print_detail(&detail);
            }
        }
        Command::Categories => {
            let categories = sources.categories.categories().await?;
            if cli.json {
                print_json(categories.as_ref())?;
            } else {
                print_categories(&categories);
            }
        }
        Command::Suppliers { policy } => {
            let mut results = sources.suppliers.demo(policy);
            let mut suppliers = Vec::new();
            while let Some(item) = results.next().await {
                match item {
                    Ok(supplier) => suppliers.push(supplier),
                    Err(error) => eprintln!("{}", error),
                }
            }

            if cli.json {
                print_json(&suppliers)?;
            } else {
                print_suppliers(&suppliers);
            }
        }
    }

    Ok(())
}

/// A view stream's next value, or the message its error channel reported.
fn next_value<T>(
    item: Option<Result<T, catalog_view::FetchError>>,
    errors: &ErrorChannel,
) -> anyhow::Result<T> {
    match item {
        Some(Ok(value)) => Ok(value),
        Some(Err(error)) => bail!("{}", error),
        None => bail!(
            "{}",
            errors
                .latest()
                .unwrap_or_else(|| "view closed without a value".to_string())
        ),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_products(products: &[Product]) {
    for p in products {
        println!(
            "{:>4}  {:<24} {:<10} {:<12} {:>8.2} {:>5}",
            p.id,
            p.product_name,
            p.product_code,
            p.category.as_deref().unwrap_or("-"),
            p.price.unwrap_or(0.0),
            p.quantity_in_stock,
        );
    }
}

fn print_detail(detail: &DetailView) {
    match (&detail.page_title, &detail.product) {
        (Some(title), Some(product)) => {
            println!("{}", title);
            println!("  Code:        {}", product.product_code);
            println!("  Category:    {}", product.category.as_deref().unwrap_or("-"));
            println!("  Description: {}", product.description);
            println!("  Price:       {:.2}", product.price.unwrap_or(0.0));
            println!("  In stock:    {}", product.quantity_in_stock);
            if detail.suppliers.is_empty() {
                println!("  No suppliers");
            } else {
                println!("  Suppliers:");
                print_suppliers(&detail.suppliers);
            }
        }
        _ => println!("No product found"),
    }
}

fn print_categories(categories: &[Category]) {
    for c in categories {
        println!("{:>4}  {}", c.id, c.name);
    }
}

fn print_suppliers(suppliers: &[Supplier]) {
    for s in suppliers {
        println!(
            "{:>4}  {:<24} cost {:>8.2}  min {}",
            s.id,
            s.supplier_name,
            s.cost.unwrap_or(0.0),
            s.min_quantity.unwrap_or(0),
        );
    }
}
