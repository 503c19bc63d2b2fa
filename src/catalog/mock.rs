//! Embedded demo catalog.
//!
//! Built once per process and shared read-only afterwards.

use std::sync::OnceLock;

use rust_decimal::Decimal;

use super::types::{Category, Color, Offer, Product, ProductId};

const BLACK: u32 = 0x000000;
const WHITE: u32 = 0xFFFFFF;
const BLUE: u32 = 0x0000FF;

/// Static collections backing [`super::StaticCatalog::mock`].
pub(crate) struct MockData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub offers: Vec<Offer>,
}

pub(crate) fn mock_data() -> &'static MockData {
    static DATA: OnceLock<MockData> = OnceLock::new();
    DATA.get_or_init(build)
}

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    price_cents: i64,
    payment_details: &'static str,
    colors: &'static [(&'static str, u32)],
    sizes: &'static [&'static str],
    categories: &'static [usize],
    featured: bool,
    discount_percent: f64,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "PFI001",
        name: "PERFUME LANCÔME LA VIE EST BELLE FEMININO EAU DE PARFUM",
        brand: "Lancome",
        price_cents: 44990,
        payment_details: "10x de R$ 49,90 sem juros no cartão Renner",
        colors: &[],
        sizes: &["50ml"],
        categories: &[3],
        featured: true,
        discount_percent: 0.0,
    },
    ProductSeed {
        id: "INF001",
        name: "BLUSÃO INFANTIL COM ESTAMPA FORTNITE - TAM PP AO G AZUL",
        brand: "Fortnite",
        price_cents: 13990,
        payment_details: "8x de R$ 17,49* sem juros no Cartão Renner",
        colors: &[("Azul", BLUE)],
        sizes: &["PP", "P", "M", "G"],
        categories: &[2],
        featured: false,
        discount_percent: 0.0,
    },
    ProductSeed {
        id: "MASC001",
        name: "CAMISETA MANGA LONGA ESTAMPA VENICE BEACH PRETO",
        brand: "Ripping",
        price_cents: 2990,
        payment_details: "1x de R$ 29,90* sem juros no Cartão Renner",
        colors: &[("Preto", BLACK)],
        sizes: &["PP", "P", "M", "GG"],
        categories: &[1],
        featured: false,
        discount_percent: 50.0,
    },
    ProductSeed {
        id: "FEM001",
        name: "CASACO ALONGADO EM POLIVELOUR XADREZ COM ABOTOAMENTO FRONTAL PRETO",
        brand: "Blue Steel",
        price_cents: 33990,
        payment_details: "10x de R$ 39,99* sem juros no Cartão Renner",
        colors: &[("Preto", BLACK)],
        sizes: &["PP", "P", "M", "G", "GG"],
        categories: &[0],
        featured: true,
        discount_percent: 0.0,
    },
    ProductSeed {
        id: "MASC002",
        name: "CAMISETA MANGA LONGA ESTAMPA LETTERING LOS ANGELES",
        brand: "Ripping",
        price_cents: 2990,
        payment_details: "1x de R$ 29,90*  sem juros no Cartão Renner",
        colors: &[("Preto", BLACK), ("Branco", WHITE)],
        sizes: &["PP", "P", "M", "G", "GG"],
        categories: &[1],
        featured: true,
        discount_percent: 50.0,
    },
    ProductSeed {
        id: "FEM015",
        name: "Kit de maquiagem: paleta multifuncional, glos e máscara de cílios Alchemia",
        brand: "Alchemia",
        price_cents: 9990,
        payment_details: "5x de R$ 19,98*  s/ juros no Cartão Renner",
        colors: &[],
        sizes: &[],
        categories: &[3, 0],
        featured: false,
        discount_percent: 0.0,
    },
    ProductSeed {
        id: "MASC015",
        name: "Relógio Lince com Pulseira em aço e caixa em metal",
        brand: "Lince",
        price_cents: 27990,
        payment_details: "10x de R$ 27,99*  sem juros no Cartão Renner",
        colors: &[("Preto", BLACK)],
        sizes: &["U"],
        categories: &[1, 5],
        featured: false,
        discount_percent: 0.0,
    },
];

// (code, name, description, product indexes)
const OFFERS: &[(&str, &str, &str, &[usize])] = &[
    (
        "of:masc001",
        "No mood de camisas",
        "Visual arrumado com as cores da estação",
        &[2, 4],
    ),
    (
        "of:fem001",
        "Versáteis e Elegantes",
        "Looks do PP ao G2 que te deixam pronta para qualquer ocasião",
        &[3],
    ),
    (
        "of:bel001",
        "Alchemia",
        "Cuidado, beleza e bem estar",
        &[5],
    ),
    (
        "of:bel002",
        "Dia das Mães",
        "Perfumes e kits para surpreender nesse dia especial",
        &[0],
    ),
    (
        "of:acc002",
        "É tempo de presentear",
        "Relógios e kits para todos os estilos",
        &[6],
    ),
];

fn build() -> MockData {
    let categories = vec![
        Category::new("cat:fem", "Feminino"),
        Category::new("cat:masc", "Masculino"),
        Category::new("cat:inf", "Infantil"),
        Category::new("cat:bel", "Beleza"),
        Category::new("cat:casa", "Casa"),
        Category::new("cat:acc", "Acessórios"),
    ];

    let products: Vec<Product> = PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::from(seed.id),
            name: seed.name.to_string(),
            brand: seed.brand.to_string(),
            price: Decimal::new(seed.price_cents, 2),
            payment_details: seed.payment_details.to_string(),
            colors: seed
                .colors
                .iter()
                .map(|(name, rgb)| Color::new(name, *rgb))
                .collect(),
            sizes: seed.sizes.iter().map(|s| s.to_string()).collect(),
            categories: seed
                .categories
                .iter()
                .filter_map(|&i| categories.get(i).cloned())
                .collect(),
            featured: seed.featured,
            discount_percent: seed.discount_percent,
        })
        .collect();

    let offers = OFFERS
        .iter()
        .map(|(code, name, description, members)| Offer {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            products: members
                .iter()
                .filter_map(|&i| products.get(i).cloned())
                .collect(),
        })
        .collect();

    MockData {
        categories,
        products,
        offers,
    }
}
