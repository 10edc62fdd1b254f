//! JavaScript output for projects driving `act` through the `@kie/act-js`
//! harness with a shared `utils` helper module.

use crate::scaffold::ir::{ExpectedStepDecl, Item, Module, Symbol, TestSkeleton};
use crate::scaffold::naming::pascal_case;

use super::{Language, Renderer};

const INDENT: &str = "    ";
const HEADER: &str = "const utils = require('../utils/utils');\n";

/// Renders generated modules as CommonJS.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptRenderer;

impl JavaScriptRenderer {
    /// Function name of a job's assertion.
    pub fn assertion_fn_name(job_id: &str) -> String {
        format!("assert{}JobExecuted", pascal_case(job_id))
    }

    fn symbol_name(symbol: &Symbol) -> String {
        match symbol {
            Symbol::Value(name) => name.clone(),
            Symbol::JobAssertion(label) => Self::assertion_fn_name(label),
        }
    }

    fn expected_step(step: &ExpectedStepDecl) -> String {
        let pad = INDENT.repeat(2);
        let mut out = format!("{}utils.createStepAssertion(\n", pad);
        for arg in [
            string_literal(&step.name),
            "true".to_string(),
            "null".to_string(),
            string_literal(&step.job_id),
            string_literal(&step.message),
            params_literal(&step.inputs),
            params_literal(&step.envs),
        ] {
            out.push_str(&format!("{}{}{},\n", pad, INDENT, arg));
        }
        out.push_str(&format!("{}),\n", pad));
        out
    }
}

impl Renderer for JavaScriptRenderer {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn render_module(&self, module: &Module) -> String {
        let mut out = HEADER.to_string();
        for item in &module.items {
            match item {
                Item::Section { job_id, needs } => {
                    out.push_str(&format!("\n// {}", job_id.to_lowercase()));
                    if !needs.is_empty() {
                        out.push_str(&format!(" (needs: {})", needs.join(", ")));
                    }
                    out.push('\n');
                }
                Item::StepMock(decl) => {
                    out.push_str(&format!("const {} = utils.createMockStep(\n", decl.ident));
                    for arg in [
                        string_literal(&decl.name),
                        string_literal(&decl.message),
                        string_literal(&decl.job_id),
                        array_literal(&decl.inputs),
                        array_literal(&decl.envs),
                    ] {
                        out.push_str(&format!("{}{},\n", INDENT, arg));
                    }
                    out.push_str(&format!("{}// add outputs if needed\n);\n", INDENT));
                }
                Item::MockList { name, members } => {
                    out.push_str(&format!("const {} = [", name));
                    if !members.is_empty() {
                        out.push('\n');
                        for member in members {
                            out.push_str(&format!("{}{},\n", INDENT, member));
                        }
                    }
                    out.push_str("];\n");
                }
                Item::JobAssertion(decl) => {
                    out.push_str(&format!(
                        "\nfunction {}(workflowResult, didExecute = true) {{\n",
                        Self::assertion_fn_name(&decl.label)
                    ));
                    out.push_str(&format!("{}const steps = [\n", INDENT));
                    for step in &decl.steps {
                        out.push_str(&Self::expected_step(step));
                    }
                    out.push_str(&format!("{}];\n\n", INDENT));
                    out.push_str(&format!("{}for (const expectedStep of steps) {{\n", INDENT));
                    out.push_str(&format!("{}{}if (didExecute) {{\n", INDENT, INDENT));
                    out.push_str(&format!(
                        "{0}{0}{0}expect(workflowResult).toEqual(expect.arrayContaining([expectedStep]));\n",
                        INDENT
                    ));
                    out.push_str(&format!("{}{}}} else {{\n", INDENT, INDENT));
                    out.push_str(&format!(
                        "{0}{0}{0}expect(workflowResult).not.toEqual(expect.arrayContaining([expectedStep]));\n",
                        INDENT
                    ));
                    out.push_str(&format!("{0}{0}}}\n{0}}}\n}}\n", INDENT));
                }
            }
        }

        out.push_str("\nmodule.exports = {\n");
        for symbol in &module.exports {
            out.push_str(&format!("{}{},\n", INDENT, Self::symbol_name(symbol)));
        }
        out.push_str("};\n");
        out
    }

    fn render_test(&self, skeleton: &TestSkeleton) -> String {
        let wf = &skeleton.workflow_name;
        format!(
            r#"const path = require('path');
const kieMockGithub = require('@kie/mock-github');
const utils = require('./utils/utils');
const assertions = require('./assertions/{assertions}');
const mocks = require('./mocks/{mocks}');
const ExtendedAct = require('./utils/ExtendedAct').default;

jest.setTimeout(90 * 1000);
let mockGithub;
const FILES_TO_COPY_INTO_TEST_REPO = [
    ...utils.deepCopy(utils.FILES_TO_COPY_INTO_TEST_REPO),
    {{
        src: path.resolve(__dirname, '..', '.github', 'workflows', '{wf}.yml'),
        dest: '.github/workflows/{wf}.yml',
    }},
];

describe('test workflow {wf}', () => {{
    beforeAll(async () => {{
        // remove a mock repo left behind by an interrupted run
        utils.removeMockRepoDir();
    }});

    beforeEach(async () => {{
        // create a local repository and copy required files
        mockGithub = new kieMockGithub.MockGithub({{
            repo: {{
                test{repo}WorkflowRepo: {{
                    files: FILES_TO_COPY_INTO_TEST_REPO,
                }},
            }},
        }});

        await mockGithub.setup();
    }});

    afterEach(async () => {{
        await mockGithub.teardown();
    }});

    // example test
    describe('[EVENT]', () => {{
        it('[TEST_NAME]', async () => {{
            const repoPath = mockGithub.repo.getPath('test{repo}WorkflowRepo') || '';
            const workflowPath = path.join(repoPath, '.github', 'workflows', '{wf}.yml');
            let act = new ExtendedAct(repoPath, workflowPath);
            act = utils.setUpActParams(act, '[EVENT]', {{}}, {{}}, {{}});
            const testMockSteps = {{
                // mock steps with imported mocks
            }};
            const result = await act.runEvent('[EVENT]', {{
                workflowFile: path.join(repoPath, '.github', 'workflows', '{wf}.yml'),
                mockSteps: testMockSteps,
                actor: 'Dummy Author',
                logFile: utils.getLogFilePath('{wf}', expect.getState().currentTestName),
            }});

            // assert execution with imported assertions
        }});
    }});
}});
"#,
            wf = wf,
            mocks = skeleton.mocks_stem,
            assertions = skeleton.assertions_stem,
            repo = pascal_case(wf),
        )
    }
}

/// A single-quoted JavaScript string literal.
fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn array_literal(items: &[String]) -> String {
    let inner: Vec<String> = items.iter().map(|s| string_literal(s)).collect();
    format!("[{}]", inner.join(", "))
}

fn params_literal(pairs: &[(String, String)]) -> String {
    let inner: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{{key: {}, value: {}}}", string_literal(k), string_literal(v)))
        .collect();
    format!("[{}]", inner.join(", "))
}
