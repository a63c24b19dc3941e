//! Assembles the clinical-triage instruction sent to the inference
//! service. The prompt carries the whole contract: persona, hard
//! constraints, the closed severity taxonomy, the closed alarm-sign
//! vocabulary, and the required output schema.

/// The closed alarm-sign vocabulary the oracle may select from.
pub const SINAIS_ALARME: &[&str] = &[
    "dispneia",
    "dor ou pressão torácica",
    "confusão mental",
    "síncope",
    "rigidez de nuca",
    "hemoptise",
    "SpO2 abaixo de 95%",
    "sinais de sepse",
    "desidratação grave",
    "deterioração rápida",
];

const CABECALHO: &str = "\
Você é um assistente de triagem clínica e segue as diretrizes do \
Ministério da Saúde do Brasil e da OMS. Responda sempre em português do Brasil.

REGRAS ABSOLUTAS:
1. NÃO forneça diagnóstico definitivo nem prescrição de medicamentos.
2. Use SOMENTE os dados fornecidos abaixo.
3. Declare incerteza explicitamente quando faltarem dados.
4. Responda com UM ÚNICO objeto JSON, sem nenhum texto antes ou depois.

CLASSIFICAÇÃO DE GRAVIDADE (exatamente uma):
- \"alta\": SpO2 abaixo de 95%, desconforto respiratório moderado ou grave, \
dor ou pressão torácica, confusão mental, síncope, rigidez de nuca, hemoptise, \
sinais de sepse, desidratação grave, deterioração rápida.
- \"moderada\": febre sustentada há 3 dias ou mais, dor torácica moderada, \
vômitos persistentes, diarreia moderada, dor localizada intensa sem sinais de alarme.
- \"baixa\": sintomas leves e autolimitados.
- \"indefinida\": dados insuficientes para classificar.";

const FORMATO_SAIDA: &str = "\
FORMATO DE SAÍDA (objeto JSON único):
{
  \"hipoteses\": [\"lista ordenada de hipóteses\"],
  \"gravidade\": \"baixa\" | \"moderada\" | \"alta\" | \"indefinida\",
  \"sinais_alarme\": [\"subconjunto da lista acima, possivelmente vazio\"],
  \"justificativa\": \"até 50 palavras\",
  \"recomendacao\": \"até 160 caracteres\",
  \"exames_sugeridos\": [\"no máximo 3 itens\"],
  \"confianca\": 0.0
}";

const NAO_INFORMADO: &str = "(não informado)";

/// Build the full triage instruction. Missing sections are rendered as an
/// explicit placeholder so the oracle always sees a complete template.
pub fn build_triage_prompt(sintomas: &str, anamnese: &str, resumo_exames: &str) -> String {
    let mut prompt = String::new();

    prompt.push_str(CABECALHO);
    prompt.push_str("\n\nSINAIS DE ALARME (selecione zero ou mais, apenas desta lista):\n");
    for sinal in SINAIS_ALARME {
        prompt.push_str(&format!("- {sinal}\n"));
    }
    prompt.push('\n');
    prompt.push_str(FORMATO_SAIDA);

    prompt.push_str("\n\nDADOS DO PACIENTE:\n");
    prompt.push_str(&format!("Sintomas: {}\n", secao(sintomas)));
    prompt.push_str(&format!("Anamnese: {}\n", secao(anamnese)));
    prompt.push_str(&format!("Resumo dos exames:\n{}\n", secao(resumo_exames)));

    prompt
}

fn secao(texto: &str) -> &str {
    let aparado = texto.trim();
    if aparado.is_empty() {
        NAO_INFORMADO
    } else {
        aparado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_forbids_diagnosis_and_demands_json() {
        let prompt = build_triage_prompt("febre", "", "");
        assert!(prompt.contains("NÃO forneça diagnóstico definitivo"));
        assert!(prompt.contains("UM ÚNICO objeto JSON"));
    }

    #[test]
    fn prompt_contains_all_severity_labels() {
        let prompt = build_triage_prompt("febre", "", "");
        for label in ["\"baixa\"", "\"moderada\"", "\"alta\"", "\"indefinida\""] {
            assert!(prompt.contains(label), "missing {label}");
        }
    }

    #[test]
    fn prompt_lists_full_alarm_vocabulary() {
        let prompt = build_triage_prompt("febre", "", "");
        for sinal in SINAIS_ALARME {
            assert!(prompt.contains(sinal), "missing alarm sign {sinal}");
        }
    }

    #[test]
    fn prompt_embeds_supplied_sections() {
        let prompt = build_triage_prompt(
            "tosse seca há 5 dias",
            "asma na infância",
            "Tipo: raio-x | Resultado: sem alterações",
        );
        assert!(prompt.contains("Sintomas: tosse seca há 5 dias"));
        assert!(prompt.contains("Anamnese: asma na infância"));
        assert!(prompt.contains("Tipo: raio-x"));
    }

    #[test]
    fn missing_sections_render_placeholder_not_omission() {
        let prompt = build_triage_prompt("febre", "  ", "");
        assert!(prompt.contains("Anamnese: (não informado)"));
        assert!(prompt.contains("Resumo dos exames:\n(não informado)"));
    }

    #[test]
    fn output_schema_names_every_field() {
        let prompt = build_triage_prompt("febre", "", "");
        for campo in [
            "hipoteses",
            "gravidade",
            "sinais_alarme",
            "justificativa",
            "recomendacao",
            "exames_sugeridos",
            "confianca",
        ] {
            assert!(prompt.contains(campo), "missing schema field {campo}");
        }
    }
}
