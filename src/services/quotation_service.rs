// src/services/quotation_service.rs
//
// O motor de orçamentos: transformação pura de carrinho + destinatário
// em um documento numerado, com imposto calculado e totais fechados.
// Nenhuma função aqui toca banco ou relógio global; o instante é sempre
// um parâmetro, o que mantém tudo determinístico nos testes.

use chrono::NaiveDateTime;

use crate::models::quotation::{
    CartLine, CompanyInfo, QuotationDocument, QuotationItem, QuotationMetadata, RecipientInfo,
    TaxBreakdown,
};

// Mínimo de linhas da tabela impressa; a camada de renderização completa
// com linhas em branco. Nunca entra no cálculo dos totais.
pub const MIN_PRINT_ROWS: usize = 10;

// Sufixo de moeda do locale do sistema (won coreano, valores inteiros)
const CURRENCY_SUFFIX: &str = "원";

/// Gera o número do documento no formato YYYYMMDD-HHMMSS a partir do
/// relógio de parede local (ex: 20250117-143025).
///
/// Limitação aceita: dois documentos gerados no mesmo segundo recebem o
/// mesmo número. O comportamento é intencional (compatível com o
/// sistema em produção) e está registrado como questão em aberto.
pub fn generate_document_number(now: NaiveDateTime) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

/// Data do documento no formato ISO YYYY-MM-DD.
pub fn format_date_iso(now: NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Calcula o imposto de 10% sobre o valor de fornecimento, arredondando
/// a metade para cima (round-half-up), em aritmética inteira:
/// `(p + 5) / 10` — ex: 12345 -> 1235 (caso de empate 1234.5).
///
/// Valor negativo é violação de contrato do chamador (quantidades e
/// preços são validados antes); como a saída é financeira, falhamos
/// alto em vez de saturar silenciosamente.
pub fn compute_tax(supply_price: i64) -> TaxBreakdown {
    assert!(
        supply_price >= 0,
        "valor de fornecimento negativo: {}",
        supply_price
    );

    let tax_amount = (supply_price + 5) / 10;
    TaxBreakdown {
        supply_price,
        tax_amount,
        total_amount: supply_price + tax_amount,
    }
}

/// Converte as linhas do carrinho em itens do orçamento, na ordem do
/// carrinho (seq = posição 1-based, sem reordenação). O imposto é
/// calculado POR LINHA — nunca derivado de um agregado, para o desvio
/// de arredondamento entre linhas ficar visível nos totais.
pub fn convert_cart_to_items(cart: &[CartLine]) -> Vec<QuotationItem> {
    cart.iter()
        .enumerate()
        .map(|(index, line)| {
            let supply_price = line.product.price * i64::from(line.quantity);
            let tax = compute_tax(supply_price);

            QuotationItem {
                seq: index as u32 + 1,
                name: line.product.name.clone(),
                // Vazia quando o produto não tem descrição; nunca nula.
                spec: line.product.description.clone().unwrap_or_default(),
                quantity: line.quantity,
                unit_price: line.product.price,
                supply_price,
                tax_amount: tax.tax_amount,
            }
        })
        .collect()
}

/// Monta o documento completo: metadados (número + data ISO), itens e
/// totais como somas exatas dos valores por linha.
///
/// Carrinho vazio é VÁLIDO: documento com zero itens e totais zerados,
/// com metadados bem formados (a renderização decide o que imprimir).
pub fn generate_document(
    cart: &[CartLine],
    recipient: RecipientInfo,
    company: CompanyInfo,
    now: NaiveDateTime,
) -> QuotationDocument {
    let metadata = QuotationMetadata {
        number: generate_document_number(now),
        date: format_date_iso(now),
    };

    let items = convert_cart_to_items(cart);

    let total_supply_price: i64 = items.iter().map(|item| item.supply_price).sum();
    let total_tax_amount: i64 = items.iter().map(|item| item.tax_amount).sum();
    let total_amount = total_supply_price + total_tax_amount;

    QuotationDocument {
        metadata,
        company,
        recipient,
        items,
        total_supply_price,
        total_tax_amount,
        total_amount,
    }
}

/// Agrupamento de milhares com vírgula (ex: 1000000 -> "1,000,000").
/// Entrada já é inteira; não há perda de precisão possível.
pub fn format_grouped_number(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Valor monetário com sufixo do locale (ex: 1000000 -> "1,000,000원").
pub fn format_currency(value: i64) -> String {
    format!("{}{}", format_grouped_number(value), CURRENCY_SUFFIX)
}

/// Quantas linhas em branco a renderização deve acrescentar para a
/// tabela atingir o mínimo estético. Não afeta nenhum total.
pub fn blank_row_count(item_count: usize) -> usize {
    MIN_PRINT_ROWS.saturating_sub(item_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quotation::CartProduct;
    use chrono::NaiveDate;
    use rand::Rng;

    fn line(name: &str, description: Option<&str>, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product: CartProduct {
                name: name.to_string(),
                description: description.map(|s| s.to_string()),
                price,
            },
            quantity,
        }
    }

    fn sample_instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 17)
            .unwrap()
            .and_hms_opt(14, 30, 25)
            .unwrap()
    }

    // --- Imposto ---

    #[test]
    fn imposto_de_dez_porcento_exato() {
        let tax = compute_tax(150_000);
        assert_eq!(tax.supply_price, 150_000);
        assert_eq!(tax.tax_amount, 15_000);
        assert_eq!(tax.total_amount, 165_000);
    }

    #[test]
    fn empate_arredonda_para_cima() {
        // 12345 * 0.1 = 1234.5 -> 1235 (round-half-up, fixado por contrato)
        assert_eq!(compute_tax(12_345).tax_amount, 1_235);
        assert_eq!(compute_tax(12_345).total_amount, 13_580);
        // 5 * 0.1 = 0.5 -> 1
        assert_eq!(compute_tax(5).tax_amount, 1);
        // abaixo do empate arredonda para baixo
        assert_eq!(compute_tax(12_344).tax_amount, 1_234);
        assert_eq!(compute_tax(4).tax_amount, 0);
    }

    #[test]
    fn imposto_sobre_zero_e_zero() {
        let tax = compute_tax(0);
        assert_eq!(tax.tax_amount, 0);
        assert_eq!(tax.total_amount, 0);
    }

    #[test]
    #[should_panic(expected = "valor de fornecimento negativo")]
    fn valor_negativo_e_erro_de_programacao() {
        compute_tax(-1);
    }

    // --- Conversão do carrinho ---

    #[test]
    fn sequencia_segue_a_ordem_do_carrinho() {
        let cart = vec![
            line("Furadeira", Some("750W"), 150_000, 2),
            line("Parafusadeira", None, 89_000, 1),
            line("Trena", Some("5m"), 12_000, 3),
        ];

        let items = convert_cart_to_items(&cart);
        assert_eq!(items.len(), 3);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.seq, i as u32 + 1);
        }
        assert_eq!(items[0].name, "Furadeira");
        assert_eq!(items[2].name, "Trena");
    }

    #[test]
    fn descricao_ausente_vira_spec_vazia() {
        let items = convert_cart_to_items(&[line("Item", None, 1_000, 1)]);
        assert_eq!(items[0].spec, "");
    }

    #[test]
    fn supply_price_e_unitario_vezes_quantidade() {
        let items = convert_cart_to_items(&[line("Item", None, 12_345, 7)]);
        assert_eq!(items[0].supply_price, 12_345 * 7);
        assert_eq!(items[0].tax_amount, compute_tax(12_345 * 7).tax_amount);
    }

    // --- Documento ---

    #[test]
    fn numero_e_data_do_documento() {
        let now = sample_instant();
        assert_eq!(generate_document_number(now), "20250117-143025");
        assert_eq!(format_date_iso(now), "2025-01-17");
    }

    #[test]
    fn componentes_de_um_digito_sao_preenchidos_com_zero() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(7, 4, 9)
            .unwrap();
        assert_eq!(generate_document_number(now), "20250305-070409");
        assert_eq!(format_date_iso(now), "2025-03-05");
    }

    #[test]
    fn totais_fecham_com_as_linhas() {
        let cart = vec![
            line("A", None, 12_345, 1),
            line("B", None, 150_000, 2),
            line("C", Some("spec"), 999, 13),
        ];
        let doc = generate_document(
            &cart,
            RecipientInfo::default(),
            CompanyInfo::default(),
            sample_instant(),
        );

        let soma_fornecimento: i64 = doc.items.iter().map(|i| i.supply_price).sum();
        let soma_imposto: i64 = doc.items.iter().map(|i| i.tax_amount).sum();
        assert_eq!(doc.total_supply_price, soma_fornecimento);
        assert_eq!(doc.total_tax_amount, soma_imposto);
        assert_eq!(doc.total_amount, doc.total_supply_price + doc.total_tax_amount);
    }

    #[test]
    fn totais_fecham_para_carrinhos_aleatorios() {
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let n = rng.gen_range(1..=20);
            let cart: Vec<CartLine> = (0..n)
                .map(|i| {
                    line(
                        &format!("Produto {}", i),
                        None,
                        rng.gen_range(0..=10_000_000),
                        rng.gen_range(1..=999),
                    )
                })
                .collect();

            let doc = generate_document(
                &cart,
                RecipientInfo::default(),
                CompanyInfo::default(),
                sample_instant(),
            );

            assert_eq!(doc.items.len(), cart.len());
            for (item, cart_line) in doc.items.iter().zip(&cart) {
                assert_eq!(
                    item.supply_price,
                    cart_line.product.price * i64::from(cart_line.quantity)
                );
            }
            let soma_fornecimento: i64 = doc.items.iter().map(|i| i.supply_price).sum();
            let soma_imposto: i64 = doc.items.iter().map(|i| i.tax_amount).sum();
            assert_eq!(doc.total_supply_price, soma_fornecimento);
            assert_eq!(doc.total_tax_amount, soma_imposto);
            assert_eq!(doc.total_amount, soma_fornecimento + soma_imposto);
        }
    }

    #[test]
    fn carrinho_vazio_gera_documento_valido() {
        let doc = generate_document(
            &[],
            RecipientInfo {
                name: "Cliente".to_string(),
                ..RecipientInfo::default()
            },
            CompanyInfo::default(),
            sample_instant(),
        );

        assert!(doc.items.is_empty());
        assert_eq!(doc.total_supply_price, 0);
        assert_eq!(doc.total_tax_amount, 0);
        assert_eq!(doc.total_amount, 0);
        assert_eq!(doc.metadata.number, "20250117-143025");
        assert_eq!(doc.metadata.date, "2025-01-17");
    }

    #[test]
    fn gerar_de_novo_produz_numero_novo() {
        let primeiro = generate_document_number(sample_instant());
        let segundo = generate_document_number(
            sample_instant() + chrono::Duration::seconds(1),
        );
        assert_ne!(primeiro, segundo);
    }

    // --- Formatação ---

    #[test]
    fn agrupamento_de_milhares() {
        assert_eq!(format_grouped_number(0), "0");
        assert_eq!(format_grouped_number(999), "999");
        assert_eq!(format_grouped_number(1_000), "1,000");
        assert_eq!(format_grouped_number(1_000_000), "1,000,000");
        assert_eq!(format_grouped_number(123_456_789), "123,456,789");
    }

    #[test]
    fn moeda_com_sufixo_do_locale() {
        assert_eq!(format_currency(123_456), "123,456원");
        assert_eq!(format_currency(0), "0원");
    }

    // --- Preenchimento de impressão ---

    #[test]
    fn linhas_em_branco_ate_o_minimo() {
        assert_eq!(blank_row_count(0), 10);
        assert_eq!(blank_row_count(3), 7);
        assert_eq!(blank_row_count(10), 0);
        assert_eq!(blank_row_count(15), 0);
    }

    #[test]
    fn preenchimento_nao_altera_totais() {
        let cart = vec![line("A", None, 10_000, 1)];
        let doc = generate_document(
            &cart,
            RecipientInfo::default(),
            CompanyInfo::default(),
            sample_instant(),
        );

        // O preenchimento é só da renderização: os totais vêm apenas
        // dos itens reais, calculados antes.
        assert_eq!(blank_row_count(doc.items.len()), 9);
        assert_eq!(doc.total_supply_price, 10_000);
        assert_eq!(doc.total_tax_amount, 1_000);
        assert_eq!(doc.total_amount, 11_000);
    }
}
